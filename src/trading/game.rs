use std::fmt::Debug;

use tracing::debug;

use crate::config::TableConfig;
use crate::data_structures::avl::AvlTree;
use crate::data_structures::linear_probe_table::LinearProbeTable;
use crate::data_structures::node::BinaryNode;
use crate::error::{Error, Result};
use crate::trading::potion::{Potion, Price};
use crate::util::random_gen::RandomGen;

///(buy_price, sell_price, quantity) of a potion worth reselling
type Deal = (f64, f64, f64);

/// Trading simulation between PotionCorp, the vendors and the adventurers.
///
/// The catalogue holds every potion PotionCorp sells, keyed by name. The
/// inventory holds the potions currently in stock as `(name, quantity)`,
/// keyed by buy price so vendors can pick the kth most expensive one.
#[derive(Debug)]
pub struct Game {
    catalogue: Option<LinearProbeTable<Potion>>,
    inventory: AvlTree<Price, (String, f64)>,
    rand: RandomGen,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Game {
    pub fn new(seed: i64) -> Game {
        Game {
            catalogue: None,
            inventory: AvlTree::new(),
            rand: RandomGen::new(seed),
        }
    }

    pub fn inventory(&self) -> &AvlTree<Price, (String, f64)> {
        &self.inventory
    }
    pub fn potion(&self, name: &str) -> Result<&Potion> {
        self.catalogue()?.get(name)
    }

    fn catalogue(&self) -> Result<&LinearProbeTable<Potion>> {
        self.catalogue
            .as_ref()
            .ok_or_else(|| Error::InvalidArgument("potion data has not been set".to_string()))
    }
    fn catalogue_mut(&mut self) -> Result<&mut LinearProbeTable<Potion>> {
        self.catalogue
            .as_mut()
            .ok_or_else(|| Error::InvalidArgument("potion data has not been set".to_string()))
    }

    ///Replaces the catalogue with empty potions built from (type, name, buy_price)
    pub fn set_total_potion_data(&mut self, potion_data: &[(&str, &str, f64)]) -> Result<()> {
        let mut catalogue = LinearProbeTable::new(&TableConfig::new(potion_data.len()))?;
        for &(potion_type, name, buy_price) in potion_data {
            catalogue.insert(name, Potion::create_empty(potion_type, name, buy_price)?)?;
        }
        debug!(potions = catalogue.len(), "set potion catalogue");
        self.catalogue = Some(catalogue);
        Ok(())
    }

    /// Stocks each named potion with the given quantity and indexes it in
    /// the inventory by its buy price.
    pub fn add_potions_to_inventory(&mut self, potion_name_amount_pairs: &[(&str, f64)]) -> Result<()> {
        for &(name, quantity) in potion_name_amount_pairs {
            let potion = self.catalogue_mut()?.get_mut(name)?;
            potion.set_quantity(quantity)?;
            let buy_price = Price(potion.buy_price());
            upsert(&mut self.inventory, buy_price, (name.to_string(), quantity))?;
            debug!(name, quantity, "stocked potion");
        }
        Ok(())
    }

    /// Picks `num_vendors` distinct potions from the inventory. Vendor `i`
    /// draws `k = randint(remaining)` and takes the kth most expensive potion
    /// still on offer. The inventory is whole again once every vendor chose.
    pub fn choose_potions_for_vendors(&mut self, num_vendors: usize) -> Result<Vec<(String, f64)>> {
        if num_vendors > self.inventory.len() {
            return Err(Error::InvalidArgument(format!(
                "{num_vendors} vendors cannot choose from {} stocked potions",
                self.inventory.len()
            )));
        }

        let mut picked: Vec<(Price, (String, f64))> = Vec::with_capacity(num_vendors);
        for _ in 0..num_vendors {
            let k = self.rand.randint(self.inventory.len())?;
            let price = *self.inventory.kth_largest(k)?.key();
            let item = self.inventory.delete(&price)?;
            debug!(k, potion = %item.0, "vendor chose potion");
            picked.push((price, item));
        }
        let choices = picked.iter().map(|(_, item)| item.clone()).collect();
        for (price, item) in picked {
            self.inventory.insert(price, item)?;
        }
        Ok(choices)
    }

    /// Money held at the end of each day when adventurers pay
    /// `potion_valuations` and each day starts with `starting_money`.
    ///
    /// Potions are bought greedily in order of yield (`profit / buy_price`),
    /// the cheaper one first when yields tie.
    pub fn solve_game(&self, potion_valuations: &[(&str, f64)], starting_money: &[f64]) -> Result<Vec<f64>> {
        let catalogue = self.catalogue()?;
        let mut deals: AvlTree<(Price, Price), Deal> = AvlTree::new();
        for &(name, sell_price) in potion_valuations {
            let potion = catalogue.get(name)?;
            let (buy_price, quantity) = (potion.buy_price(), potion.quantity());
            let profit = sell_price - buy_price;
            if profit > 0.0 {
                upsert(
                    &mut deals,
                    (Price(profit / buy_price), Price(-buy_price)),
                    (buy_price, sell_price, quantity),
                )?;
            }
        }

        let mut result = Vec::with_capacity(starting_money.len());
        for &start in starting_money {
            let mut money = start;
            let mut earned = 0.0;
            let mut rank = 1;
            while rank <= deals.len() && money > 0.0 {
                let &(buy, sell, quantity) = deals.kth_largest(rank)?.value();
                let litres = (money / buy).min(quantity);
                earned += litres * sell;
                money -= litres * buy;
                rank += 1;
            }
            debug!(start, end = earned + money, "solved day");
            result.push(earned + money);
        }
        Ok(result)
    }
}

fn upsert<K: Ord + Debug, V>(tree: &mut AvlTree<K, V>, key: K, value: V) -> Result<()> {
    match tree.get_mut(&key) {
        Ok(slot) => {
            *slot = value;
            Ok(())
        }
        Err(_) => tree.insert(key, value),
    }
}
