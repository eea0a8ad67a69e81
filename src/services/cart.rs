// src/services/cart.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::store::{CartItem, Product};

/// Teto por linha do carrinho.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Carrinho de um usuário, indexado pelo id do produto.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total: Decimal,
}

impl Cart {
    /// Adicionar de novo o mesmo produto soma na quantidade.
    pub fn add(&mut self, product: Product) {
        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1).min(MAX_ITEM_QUANTITY)
            }
            None => self.items.push(CartItem {
                product,
                quantity: 1,
            }),
        }
        self.recalculate();
    }

    /// Quantidade <= 0 remove a linha; nunca fica linha zerada.
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product_id)
        {
            item.quantity = u32::try_from(quantity)
                .unwrap_or(MAX_ITEM_QUANTITY)
                .min(MAX_ITEM_QUANTITY);
        }
        self.recalculate();
    }

    /// Junta as linhas de outro carrinho, somando quantidades.
    pub fn merge(&mut self, other: Cart) {
        for line in other.items {
            match self
                .items
                .iter_mut()
                .find(|item| item.product.id == line.product.id)
            {
                Some(item) => {
                    item.quantity = item
                        .quantity
                        .saturating_add(line.quantity)
                        .min(MAX_ITEM_QUANTITY)
                }
                None => self.items.push(line),
            }
        }
        self.recalculate();
    }

    pub fn remove(&mut self, product_id: Uuid) {
        self.items.retain(|item| item.product.id != product_id);
        self.recalculate();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recalculate(&mut self) {
        self.total = self.items.iter().map(CartItem::subtotal).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product(name: &str, price: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            price: Decimal::from_str(price).unwrap(),
            image: None,
            category: "Vestuário".into(),
        }
    }

    #[test]
    fn repeat_add_merges_quantity() {
        let kimono = product("Kimono", "300.00");
        let mut cart = Cart::default();
        cart.add(kimono.clone());
        cart.add(kimono.clone());

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.total, Decimal::from_str("600.00").unwrap());
    }

    #[test]
    fn quantity_zero_or_below_removes_line() {
        let kimono = product("Kimono", "300.00");
        let faixa = product("Faixa", "45.50");
        let mut cart = Cart::default();
        cart.add(kimono.clone());
        cart.add(faixa.clone());

        cart.set_quantity(kimono.id, 0);
        assert_eq!(cart.items.len(), 1);
        assert!(cart.items.iter().all(|item| item.quantity > 0));

        cart.set_quantity(faixa.id, -3);
        assert!(cart.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);
    }

    #[test]
    fn set_quantity_updates_total() {
        let faixa = product("Faixa", "45.50");
        let mut cart = Cart::default();
        cart.add(faixa.clone());
        cart.set_quantity(faixa.id, 3);

        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.total, Decimal::from_str("136.50").unwrap());
    }

    #[test]
    fn huge_quantity_is_capped_and_adding_again_stays_capped() {
        let kimono = product("Kimono", "300.00");
        let mut cart = Cart::default();
        cart.add(kimono.clone());

        cart.set_quantity(kimono.id, i64::MAX);
        assert_eq!(cart.items[0].quantity, MAX_ITEM_QUANTITY);

        cart.add(kimono.clone());
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, MAX_ITEM_QUANTITY);
        assert_eq!(cart.total, Decimal::from(MAX_ITEM_QUANTITY) * kimono.price);
    }

    #[test]
    fn merge_sums_shared_lines_and_keeps_new_ones() {
        let kimono = product("Kimono", "300.00");
        let faixa = product("Faixa", "45.50");

        let mut cart = Cart::default();
        cart.add(kimono.clone());

        let mut newer = Cart::default();
        newer.add(kimono.clone());
        newer.add(faixa.clone());

        cart.merge(newer);
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.total, Decimal::from_str("645.50").unwrap());
    }

    #[test]
    fn unknown_product_quantity_update_is_ignored() {
        let mut cart = Cart::default();
        cart.add(product("Kimono", "300.00"));
        cart.set_quantity(Uuid::new_v4(), 5);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 1);
    }
}
