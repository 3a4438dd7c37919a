use crate::Amount;

/// Coupon settings for a storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// The single recognized coupon, matched ignoring ASCII case.
    pub coupon_code: String,
    /// Discount granted by the coupon, in basis points of the subtotal.
    pub discount_bps: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            coupon_code: "POWERLABSx".to_string(),
            discount_bps: 1320,
        }
    }
}

impl PricingConfig {
    /// Whole-input, case-insensitive match. Surrounding whitespace is not stripped.
    pub fn is_valid_coupon(&self, code: &str) -> bool {
        code.eq_ignore_ascii_case(&self.coupon_code)
    }

    pub fn discount_for(&self, subtotal: Amount) -> Amount {
        subtotal.percent_bps(self.discount_bps)
    }

    /// Human readable rate, e.g. `13.2%`.
    pub fn discount_label(&self) -> String {
        let whole = self.discount_bps / 100;
        let frac = self.discount_bps % 100;
        match frac {
            0 => format!("{whole}%"),
            f if f % 10 == 0 => format!("{whole}.{}%", f / 10),
            f => format!("{whole}.{f:02}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupon_matches_ignoring_case() {
        let config = PricingConfig::default();
        assert!(config.is_valid_coupon("POWERLABSx"));
        assert!(config.is_valid_coupon("powerlabsx"));
        assert!(config.is_valid_coupon("PowerLabsX"));
    }

    #[test]
    fn coupon_rejects_partial_or_padded_codes() {
        let config = PricingConfig::default();
        assert!(!config.is_valid_coupon("SAVE10"));
        assert!(!config.is_valid_coupon("POWERLABS"));
        assert!(!config.is_valid_coupon("POWERLABSxx"));
        assert!(!config.is_valid_coupon(" POWERLABSx"));
        assert!(!config.is_valid_coupon("POWER LABSx"));
    }

    #[test]
    fn default_discount() {
        let config = PricingConfig::default();
        assert_eq!(
            config.discount_for(Amount::from_float(10_000.0)),
            Amount::from_float(1320.0)
        );
    }

    #[test]
    fn labels() {
        let mut config = PricingConfig::default();
        assert_eq!(config.discount_label(), "13.2%");
        config.discount_bps = 1000;
        assert_eq!(config.discount_label(), "10%");
        config.discount_bps = 1255;
        assert_eq!(config.discount_label(), "12.55%");
    }
}
