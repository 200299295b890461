//! Share codes: brotli-compressed text, base64 encoded.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{ConsoleError, Result};

const BUFFER_SIZE: usize = 4096;
const QUALITY: u32 = 11;
const WINDOW_BITS: u32 = 22;

/// Compress `text` into a share code on the blocking pool.
pub async fn compress(text: &str) -> Result<String> {
    let input = text.to_owned();
    tokio::task::spawn_blocking(move || compress_blocking(&input))
        .await
        .map_err(|e| ConsoleError::Custom(e.to_string()))?
}

/// Expand a share code back to text on the blocking pool.
pub async fn decompress(code: &str) -> Result<String> {
    let input = code.to_owned();
    tokio::task::spawn_blocking(move || decompress_blocking(&input))
        .await
        .map_err(|e| ConsoleError::Custom(e.to_string()))?
}

pub fn compress_blocking(text: &str) -> Result<String> {
    let mut compressed = Vec::new();
    {
        // The stream is finalized when the writer is dropped.
        let mut writer =
            brotli::CompressorWriter::new(&mut compressed, BUFFER_SIZE, QUALITY, WINDOW_BITS);
        writer.write_all(text.as_bytes())?;
    }
    Ok(STANDARD.encode(compressed))
}

pub fn decompress_blocking(code: &str) -> Result<String> {
    let bytes = STANDARD.decode(code.trim())?;
    let mut text = String::new();
    brotli::Decompressor::new(bytes.as_slice(), BUFFER_SIZE)
        .read_to_string(&mut text)
        .map_err(|e| ConsoleError::Custom(format!("Share code is corrupt: {e}")))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_code_is_base64() {
        let code = compress_blocking("#BOP\r\n{}").unwrap();
        assert!(STANDARD.decode(&code).is_ok());
    }

    #[test]
    fn rejects_non_base64() {
        assert!(matches!(
            decompress_blocking("not base64!!"),
            Err(ConsoleError::Decode(_))
        ));
    }

    #[test]
    fn rejects_garbage_stream() {
        let code = STANDARD.encode(b"definitely not brotli data");
        assert!(matches!(
            decompress_blocking(&code),
            Err(ConsoleError::Custom(_))
        ));
    }

    #[tokio::test]
    async fn async_wrappers_round_trip_unicode() {
        let text = "#SETTINGS\r\n{\r\n  \"serverName\": \"周末联赛 | GT3\"\r\n}";
        let code = compress(text).await.unwrap();
        assert_eq!(decompress(&code).await.unwrap(), text);
    }
}
