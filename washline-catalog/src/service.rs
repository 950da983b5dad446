use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::garment::GarmentKind;

/// A service offering from the shop's catalog.
///
/// Prices are whole rupees per garment. A service is never edited once an
/// order references it; orders copy the name and the quoted total at
/// creation rather than looking prices up live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_per_cloth: HashMap<GarmentKind, i32>,
}

impl Service {
    pub fn new(name: &str, description: &str, prices: [(GarmentKind, i32); 4]) -> Self {
        Self {
            id: slug(name),
            name: name.to_string(),
            description: description.to_string(),
            price_per_cloth: prices.into_iter().collect(),
        }
    }

    pub fn price_of(&self, kind: GarmentKind) -> Option<i32> {
        self.price_per_cloth.get(&kind).copied()
    }
}

/// Service ids are derived from names: lowercased, whitespace collapsed to underscores
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// The stock catalog, seeded into an empty store on startup
pub fn default_services() -> Vec<Service> {
    use GarmentKind::*;
    vec![
        Service::new(
            "Normal Wash",
            "Regular washing and drying service for everyday clothes",
            [(Shirt, 20), (Pant, 25), (Dress, 30), (Jacket, 50)],
        ),
        Service::new(
            "Wash & Iron",
            "Complete washing, drying, and ironing service",
            [(Shirt, 35), (Pant, 40), (Dress, 45), (Jacket, 70)],
        ),
        Service::new(
            "Dry Clean",
            "Professional dry cleaning for delicate fabrics",
            [(Shirt, 60), (Pant, 70), (Dress, 80), (Jacket, 120)],
        ),
        Service::new(
            "Express Service",
            "Quick 24-hour turnaround service",
            [(Shirt, 40), (Pant, 50), (Dress, 55), (Jacket, 90)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Normal Wash"), "normal_wash");
        assert_eq!(slug("Wash & Iron"), "wash_&_iron");
        assert_eq!(slug("Express  Service"), "express_service");
    }

    #[test]
    fn test_default_catalog() {
        let services = default_services();
        assert_eq!(services.len(), 4);

        let normal = services.iter().find(|s| s.id == "normal_wash").unwrap();
        assert_eq!(normal.price_of(GarmentKind::Shirt), Some(20));
        assert_eq!(normal.price_of(GarmentKind::Jacket), Some(50));

        // Every stock service prices every garment kind
        for service in &services {
            for kind in GarmentKind::ALL {
                assert!(service.price_of(kind).is_some(), "{} misses {:?}", service.name, kind);
            }
        }
    }
}
