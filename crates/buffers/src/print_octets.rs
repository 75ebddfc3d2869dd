//! Debug utility for printing octets as hex strings.

use std::fmt::Write;

/// Formats a byte slice as a hex string for debugging.
///
/// # Arguments
///
/// * `octets` - The byte slice to format.
/// * `max` - Maximum number of bytes to display.
///
/// # Example
///
/// ```
/// use marshal_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0x05, 0x61, 0xfe], 16), "05 61 fe");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let mut result = String::with_capacity(octets.len().min(max) * 3);
    for (i, byte) in octets.iter().take(max).enumerate() {
        if i > 0 {
            result.push(' ');
        }
        let _ = write!(result, "{:02x}", byte);
    }

    if octets.len() > max {
        let _ = write!(result, "... ({} more)", octets.len() - max);
    }

    result
}

/// Formats a byte slice as a hex string with default max of 32 bytes.
///
/// # Example
///
/// ```
/// use marshal_buffers::print_octets_default;
///
/// assert_eq!(print_octets_default(&[0x01, 0x02]), "01 02");
/// ```
pub fn print_octets_default(octets: &[u8]) -> String {
    print_octets(octets, 32)
}
