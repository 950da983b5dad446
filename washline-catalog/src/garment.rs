use serde::{Deserialize, Serialize};

/// The closed set of garment kinds the shop handles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GarmentKind {
    Shirt,
    Pant,
    Dress,
    Jacket,
}

impl GarmentKind {
    pub const ALL: [GarmentKind; 4] = [Self::Shirt, Self::Pant, Self::Dress, Self::Jacket];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Shirt => "Shirt",
            Self::Pant => "Pant",
            Self::Dress => "Dress",
            Self::Jacket => "Jacket",
        }
    }
}

/// Per-kind garment counts for a single order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClothQuantity {
    #[serde(default)]
    pub shirt: u32,
    #[serde(default)]
    pub pant: u32,
    #[serde(default)]
    pub dress: u32,
    #[serde(default)]
    pub jacket: u32,
}

impl ClothQuantity {
    pub fn get(&self, kind: GarmentKind) -> u32 {
        match kind {
            GarmentKind::Shirt => self.shirt,
            GarmentKind::Pant => self.pant,
            GarmentKind::Dress => self.dress,
            GarmentKind::Jacket => self.jacket,
        }
    }

    /// True when every count is zero; such an order is not accepted
    pub fn is_empty(&self) -> bool {
        GarmentKind::ALL.iter().all(|k| self.get(*k) == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GarmentKind, u32)> + '_ {
        GarmentKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    pub fn total_pieces(&self) -> u32 {
        self.iter().map(|(_, qty)| qty).sum()
    }
}
