// Formatting helpers shared by the HUD panels.

pub fn format_time(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{:01}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Three decimals matches the per-point price granularity (0.001 ETH).
pub fn format_eth(amount: f64) -> String {
    format!("{:.3} ETH", amount)
}

pub fn clog(msg: &str) {
    // Debug logging disabled to reduce console spam
    let _ = msg; // keep param to avoid warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_minutes_and_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(120), "2:00");
        assert_eq!(format_time(3600), "1:00:00");
    }

    #[test]
    fn format_eth_three_decimals() {
        assert_eq!(format_eth(0.005), "0.005 ETH");
        assert_eq!(format_eth(2.0 * 0.001), "0.002 ETH");
    }
}
