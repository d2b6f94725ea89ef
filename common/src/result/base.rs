use std::fmt::{Display, Formatter, Result};

/// One line of output: a product title and its lowest listed price.
///
/// Both fields are expected to already be normalized, the title carries no
/// commas and the price only digits and `.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub title: String,
    pub price: String,
}

impl ProductRecord {
    pub fn new(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
        }
    }

    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

impl Display for ProductRecord {
    fn fmt(&self, format: &mut Formatter) -> Result {
        write!(format, "{},{}", self.title, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_line() {
        let record = ProductRecord::new("Nice  Shirt", "19.99");

        assert_eq!(record.to_line(), "Nice  Shirt,19.99\n");
    }
}
