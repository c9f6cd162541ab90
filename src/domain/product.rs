use serde::{Deserialize, Serialize};

/// Product catalog categories accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    FoodAndGrocery,
    Automotive,
    Entertainment,
    HomeAndGarden,
    HomeAppliance,
    AuctionAndGroupBuying,
    FlowersAndGifts,
    ComputerAndSoftware,
    HealthAndBeauty,
    ServiceForIndividual,
    ServiceForBusiness,
    Sports,
    ClothingAndAccessories,
    Travel,
    HomeAudioPhotoVideo,
    Telephony,
}

impl ProductType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FOOD_AND_GROCERY" => Some(Self::FoodAndGrocery),
            "AUTOMOTIVE" => Some(Self::Automotive),
            "ENTERTAINMENT" => Some(Self::Entertainment),
            "HOME_AND_GARDEN" => Some(Self::HomeAndGarden),
            "HOME_APPLIANCE" => Some(Self::HomeAppliance),
            "AUCTION_AND_GROUP_BUYING" => Some(Self::AuctionAndGroupBuying),
            "FLOWERS_AND_GIFTS" => Some(Self::FlowersAndGifts),
            "COMPUTER_AND_SOFTWARE" => Some(Self::ComputerAndSoftware),
            "HEALTH_AND_BEAUTY" => Some(Self::HealthAndBeauty),
            "SERVICE_FOR_INDIVIDUAL" => Some(Self::ServiceForIndividual),
            "SERVICE_FOR_BUSINESS" => Some(Self::ServiceForBusiness),
            "SPORTS" => Some(Self::Sports),
            "CLOTHING_AND_ACCESSORIES" => Some(Self::ClothingAndAccessories),
            "TRAVEL" => Some(Self::Travel),
            "HOME_AUDIO_PHOTO_VIDEO" => Some(Self::HomeAudioPhotoVideo),
            "TELEPHONY" => Some(Self::Telephony),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAndGrocery => "FOOD_AND_GROCERY",
            Self::Automotive => "AUTOMOTIVE",
            Self::Entertainment => "ENTERTAINMENT",
            Self::HomeAndGarden => "HOME_AND_GARDEN",
            Self::HomeAppliance => "HOME_APPLIANCE",
            Self::AuctionAndGroupBuying => "AUCTION_AND_GROUP_BUYING",
            Self::FlowersAndGifts => "FLOWERS_AND_GIFTS",
            Self::ComputerAndSoftware => "COMPUTER_AND_SOFTWARE",
            Self::HealthAndBeauty => "HEALTH_AND_BEAUTY",
            Self::ServiceForIndividual => "SERVICE_FOR_INDIVIDUAL",
            Self::ServiceForBusiness => "SERVICE_FOR_BUSINESS",
            Self::Sports => "SPORTS",
            Self::ClothingAndAccessories => "CLOTHING_AND_ACCESSORIES",
            Self::Travel => "TRAVEL",
            Self::HomeAudioPhotoVideo => "HOME_AUDIO_PHOTO_VIDEO",
            Self::Telephony => "TELEPHONY",
        }
    }
}

/// One order line. Amounts are in the smallest currency unit, VAT included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionProduct {
    pub label: String,
    /// Unit price, VAT included.
    pub amount: u64,
    pub reference: String,
    pub quantity: u32,
    product_type: Option<ProductType>,
    vat: f64,
}

impl TransactionProduct {
    pub fn new(label: impl Into<String>, amount: u64) -> Self {
        Self {
            label: label.into(),
            amount,
            reference: String::new(),
            quantity: 1,
            product_type: None,
            vat: 0.0,
        }
    }

    pub fn product_type(&self) -> Option<ProductType> {
        self.product_type
    }

    pub fn set_product_type(&mut self, product_type: ProductType) {
        self.product_type = Some(product_type);
    }

    /// Unknown catalog values are ignored, the previous value stands.
    pub fn set_product_type_str(&mut self, value: &str) {
        if let Some(product_type) = ProductType::parse(value) {
            self.product_type = Some(product_type);
        }
    }

    pub fn vat(&self) -> f64 {
        self.vat
    }

    /// VAT rate in percent. Negative input clamps to zero.
    pub fn set_vat(&mut self, vat: f64) {
        self.vat = vat.max(0.0);
    }

    /// Unit price with VAT subtracted, truncated to the smallest unit.
    pub fn net_amount(&self) -> u64 {
        (self.amount as f64 / (1.0 + self.vat / 100.0)) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_category() {
        for value in [
            "FOOD_AND_GROCERY",
            "AUTOMOTIVE",
            "ENTERTAINMENT",
            "HOME_AND_GARDEN",
            "HOME_APPLIANCE",
            "AUCTION_AND_GROUP_BUYING",
            "FLOWERS_AND_GIFTS",
            "COMPUTER_AND_SOFTWARE",
            "HEALTH_AND_BEAUTY",
            "SERVICE_FOR_INDIVIDUAL",
            "SERVICE_FOR_BUSINESS",
            "SPORTS",
            "CLOTHING_AND_ACCESSORIES",
            "TRAVEL",
            "HOME_AUDIO_PHOTO_VIDEO",
            "TELEPHONY",
        ] {
            let parsed = ProductType::parse(value).unwrap();
            assert_eq!(parsed.as_str(), value);
        }
        assert_eq!(ProductType::parse("GROCERIES"), None);
    }

    #[test]
    fn unknown_type_write_is_ignored() {
        let mut product = TransactionProduct::new("book", 1500);
        assert_eq!(product.product_type(), None);

        product.set_product_type_str("ENTERTAINMENT");
        assert_eq!(product.product_type(), Some(ProductType::Entertainment));

        product.set_product_type_str("NOT_A_CATEGORY");
        assert_eq!(product.product_type(), Some(ProductType::Entertainment));
    }

    #[test]
    fn negative_vat_clamps_to_zero() {
        let mut product = TransactionProduct::new("book", 1500);
        product.set_vat(-5.0);
        assert_eq!(product.vat(), 0.0);
        product.set_vat(20.0);
        assert_eq!(product.vat(), 20.0);
    }

    #[test]
    fn net_amount_strips_vat() {
        let mut product = TransactionProduct::new("book", 1200);
        product.set_vat(20.0);
        assert_eq!(product.net_amount(), 1000);

        let plain = TransactionProduct::new("book", 1200);
        assert_eq!(plain.net_amount(), 1200);
    }
}
