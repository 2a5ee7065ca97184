use std::fmt::{Debug, Display, Formatter};

use crate::quantity::time::Months;

/// Payback rendered to the nearest half month, `—` when there is none.
pub struct FormattedPayback(pub Option<Months>);

impl Debug for FormattedPayback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedPayback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => write!(f, "—"),
            Some(months) => {
                let rounded = (months.0 * 2.0).round() / 2.0;
                if rounded < 1.0 { write!(f, "< 1 mo") } else { write!(f, "{rounded} mo") }
            }
        }
    }
}

pub struct FormattedPercentage(pub f64);

impl Debug for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payback_rounds_to_half_months() {
        assert_eq!(FormattedPayback(Some(Months(16.163))).to_string(), "16 mo");
        assert_eq!(FormattedPayback(Some(Months(16.3))).to_string(), "16.5 mo");
    }

    #[test]
    fn test_payback_under_a_month() {
        assert_eq!(FormattedPayback(Some(Months(0.4))).to_string(), "< 1 mo");
    }

    #[test]
    fn test_no_payback() {
        assert_eq!(FormattedPayback(None).to_string(), "—");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(FormattedPercentage(0.906).to_string(), "91%");
    }
}
