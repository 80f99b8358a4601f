use alloy_primitives::{utils, U256};

/// Render a wei amount as ether.
///
/// Trailing zeros of the fractional part are dropped but at least one digit is
/// kept, so one ether renders as `1.0` and zero as `0.0`.
pub fn format_ether(wei: U256) -> String {
    let formatted = utils::format_ether(wei);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            let fraction = if fraction.is_empty() { "0" } else { fraction };
            format!("{whole}.{fraction}")
        }
        None => format!("{formatted}.0"),
    }
}
