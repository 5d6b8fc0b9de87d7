//! # Printer Transport
//!
//! Sends rendered ESC/POS bytes to the receipt printer.
//!
//! ## Connection Strings
//! ```text
//! tcp://192.168.1.50:9100   network printer (raw JetDirect port)
//! /dev/usb/lp0              USB printer exposed as a device file
//! ```
//!
//! The transport writes and flushes; it never reads. ESC/POS status
//! back-channels are printer-specific and out of scope.

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::debug;

/// Printer transport failures.
#[derive(Debug, Error)]
pub enum PrintError {
    /// Could not reach the printer.
    #[error("printer connection failed: {0}")]
    Connect(#[source] std::io::Error),

    /// Connected, but the write or flush failed mid-job.
    #[error("printer write failed: {0}")]
    Write(#[source] std::io::Error),
}

/// Sends raw bytes to the printer named by `connection`.
///
/// `tcp://host:port` opens a socket; anything else is treated as a device
/// file path and written whole.
pub async fn send(connection: &str, bytes: &[u8]) -> Result<(), PrintError> {
    if let Some(addr) = connection.strip_prefix("tcp://") {
        debug!(addr, len = bytes.len(), "Printing over TCP");

        let mut stream = TcpStream::connect(addr)
            .await
            .map_err(PrintError::Connect)?;
        stream.write_all(bytes).await.map_err(PrintError::Write)?;
        stream.flush().await.map_err(PrintError::Write)?;
        stream.shutdown().await.map_err(PrintError::Write)?;
    } else {
        debug!(path = connection, len = bytes.len(), "Printing to device file");

        tokio::fs::write(connection, bytes)
            .await
            .map_err(PrintError::Write)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_send_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        send(&format!("tcp://{addr}"), b"\x1B\x40receipt")
            .await
            .unwrap();

        let received = server.await.unwrap();
        assert_eq!(received, b"\x1B\x40receipt");
    }

    #[tokio::test]
    async fn test_send_to_device_file() {
        let path = std::env::temp_dir().join(format!("velvet-print-{}.bin", std::process::id()));

        send(path.to_str().unwrap(), b"\x1B\x40hello").await.unwrap();

        let written = tokio::fs::read(&path).await.unwrap();
        assert_eq!(written, b"\x1B\x40hello");

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_unreachable_printer_is_connect_error() {
        // Nothing listens on port 1.
        let err = send("tcp://127.0.0.1:1", b"x").await.unwrap_err();
        assert!(matches!(err, PrintError::Connect(_)));
    }
}
