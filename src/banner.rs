//! Banner grabbing for open TCP connections.
//!
//! Every open port gets the same short HTTP-style request regardless of the
//! service behind it; whatever comes back first is reduced to a one-line
//! banner.

use crate::error::BannerError;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

/// Maximum bytes to read for a banner.
pub const MAX_BANNER_SIZE: usize = 1024;

/// Probe sent to elicit a response.
pub const HTTP_PROBE: &[u8] = b"GET / HTTP/1.1\r\n\r\n";

/// Send the probe and read back a banner within `budget`.
///
/// The write and the read share one timeout, so a silent peer costs at most
/// `budget` on top of the connect.
pub async fn grab_banner<S>(stream: &mut S, budget: Duration) -> Result<String, BannerError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; MAX_BANNER_SIZE];

    let exchange = async {
        stream.write_all(HTTP_PROBE).await?;
        stream.read(&mut buffer).await
    };

    let n = timeout(budget, exchange)
        .await
        .map_err(|_| BannerError::Timeout)??;

    first_line(&buffer[..n]).ok_or(BannerError::NoData)
}

/// Decode a response permissively and keep its first non-empty line.
pub fn first_line(data: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(data);
    let line = text.trim().lines().next()?.trim();

    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
