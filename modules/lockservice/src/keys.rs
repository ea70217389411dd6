//! Builders for the lock-key namespaces enumerated in the reservation
//! engine's component design. Centralized here so every caller agrees on
//! the exact string a given resource hashes to.

use uuid::Uuid;

pub fn product(product_id: Uuid) -> String {
    format!("inventory:product:{product_id}")
}

pub fn product_warehouse(product_id: Uuid, warehouse_id: Uuid) -> String {
    format!("inventory:product:{product_id}:warehouse:{warehouse_id}")
}

pub fn warehouse(warehouse_id: Uuid) -> String {
    format!("inventory:warehouse:{warehouse_id}")
}

pub fn order(order_id: &str) -> String {
    format!("inventory:order:{order_id}")
}

pub fn flash_sale(product_id: Uuid) -> String {
    format!("inventory:flashsale:{product_id}")
}

/// Reduces any of the above back to its namespace segment (the part before
/// the first parameter), for use as the low-cardinality `resource_namespace`
/// metric label — `inventory:product:<uuid>` would otherwise blow up label
/// cardinality.
pub fn namespace_of(resource: &str) -> String {
    let mut segments: Vec<&str> = resource.split(':').collect();
    segments.retain(|s| Uuid::parse_str(s).is_err());
    segments.join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_strips_identifiers() {
        let pid = Uuid::nil();
        let wid = Uuid::nil();
        assert_eq!(namespace_of(&product(pid)), "inventory:product");
        assert_eq!(namespace_of(&product_warehouse(pid, wid)), "inventory:product:warehouse");
        assert_eq!(namespace_of(&warehouse(wid)), "inventory:warehouse");
        assert_eq!(namespace_of(&order("ord-1")), "inventory:order:ord-1");
        assert_eq!(namespace_of(&flash_sale(pid)), "inventory:flashsale");
    }
}
