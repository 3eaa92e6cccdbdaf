use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Floating point amount with a total order, usable as a tree key.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Price(pub f64);

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Price {}
impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A potion bought from PotionCorp and sold on to adventurers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Potion {
    potion_type: String,
    name: String,
    buy_price: f64,
    quantity: f64, //litres in stock
}

impl Potion {
    pub fn new(potion_type: &str, name: &str, buy_price: f64, quantity: f64) -> Result<Self> {
        let mut potion = Self {
            potion_type: potion_type.to_string(),
            name: name.to_string(),
            buy_price: 0.0,
            quantity: 0.0,
        };
        potion.set_buy_price(buy_price)?;
        potion.set_quantity(quantity)?;
        Ok(potion)
    }
    ///Potion with nothing in stock yet
    pub fn create_empty(potion_type: &str, name: &str, buy_price: f64) -> Result<Self> {
        Self::new(potion_type, name, buy_price, 0.0)
    }

    pub fn potion_type(&self) -> &str {
        &self.potion_type
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn buy_price(&self) -> f64 {
        self.buy_price
    }
    pub fn quantity(&self) -> f64 {
        self.quantity
    }
    pub fn set_buy_price(&mut self, buy_price: f64) -> Result<()> {
        if !buy_price.is_finite() || buy_price <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "buy price of {} must be positive, got {buy_price}",
                self.name
            )));
        }
        self.buy_price = buy_price;
        Ok(())
    }
    pub fn set_quantity(&mut self, quantity: f64) -> Result<()> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "quantity of {} must be non-negative, got {quantity}",
                self.name
            )));
        }
        self.quantity = quantity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_order() {
        let mut prices = vec![Price(3.5), Price(-1.0), Price(0.0), Price(10.25)];
        prices.sort();
        assert_eq!(prices, vec![Price(-1.0), Price(0.0), Price(3.5), Price(10.25)]);
        assert!((Price(0.5), Price(-4.0)) > (Price(0.5), Price(-5.0)));
    }

    #[test]
    fn test_create_empty() {
        let potion = Potion::create_empty("Health", "Potion of Health Regeneration", 20.0).unwrap();
        assert_eq!(potion.potion_type(), "Health");
        assert_eq!(potion.name(), "Potion of Health Regeneration");
        assert_eq!(potion.buy_price(), 20.0);
        assert_eq!(potion.quantity(), 0.0);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(Potion::new("Health", "a", 0.0, 1.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(Potion::new("Health", "a", -2.0, 1.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(Potion::new("Health", "a", f64::NAN, 1.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(Potion::new("Health", "a", 2.0, -1.0), Err(Error::InvalidArgument(_))));

        let mut potion = Potion::new("Health", "a", 2.0, 1.0).unwrap();
        assert!(potion.set_quantity(f64::INFINITY).is_err());
        assert_eq!(potion.quantity(), 1.0);
        potion.set_quantity(4.5).unwrap();
        assert_eq!(potion.quantity(), 4.5);
    }
}
