use std::fs;
use std::path::Path;

const BMP_HEADER_LEN: u32 = 54;

/// A 24-bit BMP file header with no pixel data after it.
///
/// Background loading only sniffs the header, so the advertised pixel array
/// is never read.
pub fn bmp_header(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;

    let mut bytes = Vec::with_capacity(BMP_HEADER_LEN as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&(BMP_HEADER_LEN + pixel_array_size).to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&BMP_HEADER_LEN.to_le_bytes());

    // BITMAPINFOHEADER
    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&[0; 24]);
    bytes
}

/// Writes a header-only background image fixture.
pub fn write_background(path: &Path, width: u32, height: u32) {
    fs::write(path, bmp_header(width, height)).expect("write background fixture");
}
