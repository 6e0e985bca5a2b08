//! The `.puz` rolling checksum.

/// Runs the 16-bit `.puz` checksum over `bytes`, starting from `seed`.
///
/// Each step rotates the running value right by one bit, adds the next byte
/// and truncates to 16 bits. The result depends on byte order.
///
/// # Examples
///
/// ```
/// use xword_core::cksum_region;
///
/// assert_eq!(cksum_region(b"", 0x1234), 0x1234);
/// assert_eq!(cksum_region(b"A", 0), 0x41);
/// assert_ne!(cksum_region(b"AB", 0), cksum_region(b"BA", 0));
/// ```
#[must_use]
pub fn cksum_region(bytes: &[u8], seed: u16) -> u16 {
    bytes
        .iter()
        .fold(seed, |cksum, &byte| cksum.rotate_right(1).wrapping_add(u16::from(byte)))
}
