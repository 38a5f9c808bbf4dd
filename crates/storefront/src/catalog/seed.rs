//! Static seed catalog.
//!
//! The offline variant of the catalog page: eight pieces materialized once
//! at first access. The API-backed variant replaces this with
//! [`super::fetch_products`].

use std::sync::LazyLock;

use daisy_core::{Category, Product, ProductId};
use rust_decimal::Decimal;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

static CATALOG: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Petal Drop Earrings".to_owned(),
            price: Decimal::from(189),
            original_price: None,
            images: strings(&[
                "products/petal-drop-earrings.jpg",
                "products/petal-drop-earrings-alt.jpg",
            ]),
            category: Category::Earrings,
            collection: "Garden Dreams".to_owned(),
            description: "Delicate petal-shaped earrings that capture the essence of a \
                          daisy in full bloom, with a subtle gold finish that catches \
                          the light."
                .to_owned(),
            details: strings(&[
                "Handcrafted 18k gold-plated sterling silver",
                "Lightweight and comfortable for all-day wear",
                "Dimensions: 2.5cm drop length",
                "Push-back closure for secure fit",
            ]),
            materials: strings(&["18k Gold-Plated Sterling Silver", "Hypoallergenic"]),
            care_instructions: strings(&[
                "Store in the provided jewelry box",
                "Avoid contact with perfumes and lotions",
                "Clean gently with a soft cloth",
            ]),
            is_new: true,
            is_bestseller: false,
            rating: 4.9,
            reviews: 124,
            in_stock: true,
            colors: Some(strings(&["Gold", "Rose Gold", "Silver"])),
            sizes: None,
        },
        Product {
            id: ProductId::new(2),
            name: "Daisy Chain Bracelet".to_owned(),
            price: Decimal::from(245),
            original_price: Some(Decimal::from(295)),
            images: strings(&["products/daisy-chain-bracelet.jpg"]),
            category: Category::Bracelets,
            collection: "Timeless Elegance".to_owned(),
            description: "Interconnected daisy motifs symbolizing unity and natural \
                          beauty, blending classic elegance with contemporary design."
                .to_owned(),
            details: strings(&[
                "Solid 14k gold construction",
                "Adjustable chain length: 16-19cm",
                "Lobster clasp closure",
            ]),
            materials: strings(&["14k Solid Gold"]),
            care_instructions: strings(&[
                "Store separately to prevent scratching",
                "Polish regularly with jewelry cloth",
            ]),
            is_new: false,
            is_bestseller: true,
            rating: 4.8,
            reviews: 256,
            in_stock: true,
            colors: None,
            sizes: Some(strings(&["Small (16cm)", "Medium (17.5cm)", "Large (19cm)"])),
        },
        Product {
            id: ProductId::new(3),
            name: "Sunrise Pendant Necklace".to_owned(),
            price: Decimal::from(320),
            original_price: None,
            images: strings(&["products/sunrise-pendant.jpg"]),
            category: Category::Necklaces,
            collection: "Garden Dreams".to_owned(),
            description: "Inspired by the first light of dawn, with delicate rays \
                          emanating from a natural citrine center stone."
                .to_owned(),
            details: strings(&[
                "18k gold vermeil chain",
                "Natural citrine center stone",
                "Chain length: 45cm with 5cm extender",
            ]),
            materials: strings(&["18k Gold Vermeil", "Natural Citrine"]),
            care_instructions: strings(&[
                "Store flat to prevent tangling",
                "Clean with lukewarm water",
            ]),
            is_new: true,
            is_bestseller: true,
            rating: 5.0,
            reviews: 89,
            in_stock: true,
            colors: Some(strings(&[
                "Gold/Citrine",
                "Rose Gold/Rose Quartz",
                "Silver/Moonstone",
            ])),
            sizes: None,
        },
        Product {
            id: ProductId::new(4),
            name: "Eternal Bloom Ring".to_owned(),
            price: Decimal::from(275),
            original_price: None,
            images: strings(&["products/eternal-bloom-ring.jpg"]),
            category: Category::Rings,
            collection: "Bridal Blossoms".to_owned(),
            description: "A romantic ring featuring an eternally blooming daisy with \
                          pavé-set diamonds, made for celebrating love."
                .to_owned(),
            details: strings(&[
                "Solid 18k white gold",
                "Pavé-set diamonds (0.15ct total)",
                "Band width: 2mm",
            ]),
            materials: strings(&["18k White Gold", "Natural Diamonds"]),
            care_instructions: strings(&[
                "Remove during physical activities",
                "Clean with mild soap solution",
            ]),
            is_new: false,
            is_bestseller: false,
            rating: 4.7,
            reviews: 178,
            in_stock: true,
            colors: None,
            sizes: Some(strings(&["5", "6", "7", "8", "9"])),
        },
        Product {
            id: ProductId::new(5),
            name: "Whisper Hoops".to_owned(),
            price: Decimal::from(165),
            original_price: None,
            images: strings(&["products/whisper-hoops.jpg"]),
            category: Category::Earrings,
            collection: "Everyday Luxe".to_owned(),
            description: "Minimalist hoops with a delicate twisted texture, \
                          transitioning seamlessly from day to night."
                .to_owned(),
            details: strings(&[
                "14k gold-filled construction",
                "Hoop diameter: 2cm",
                "Hinged closure",
            ]),
            materials: strings(&["14k Gold-Filled", "Nickel-Free"]),
            care_instructions: strings(&[
                "Wipe clean after each wear",
                "Store in anti-tarnish pouch",
            ]),
            is_new: false,
            is_bestseller: true,
            rating: 4.9,
            reviews: 342,
            in_stock: true,
            colors: Some(strings(&["Gold", "Silver"])),
            sizes: None,
        },
        Product {
            id: ProductId::new(6),
            name: "Garden Gate Cuff".to_owned(),
            price: Decimal::from(385),
            original_price: None,
            images: strings(&["products/garden-gate-cuff.jpg"]),
            category: Category::Bracelets,
            collection: "Garden Dreams".to_owned(),
            description: "An architectural cuff inspired by ornate garden gates, \
                          featuring intricate floral scrollwork."
                .to_owned(),
            details: strings(&[
                "Solid brass with gold plating",
                "Width: 3cm at widest point",
                "Signed and numbered limited edition",
            ]),
            materials: strings(&["Gold-Plated Brass", "Lead-Free"]),
            care_instructions: strings(&[
                "Avoid bending repeatedly",
                "Polish with brass cloth",
            ]),
            is_new: true,
            is_bestseller: false,
            rating: 4.6,
            reviews: 67,
            in_stock: true,
            colors: None,
            sizes: None,
        },
        Product {
            id: ProductId::new(7),
            name: "Moonlit Pearl Strand".to_owned(),
            price: Decimal::from(520),
            original_price: Some(Decimal::from(650)),
            images: strings(&["products/moonlit-pearl-strand.jpg"]),
            category: Category::Necklaces,
            collection: "Timeless Elegance".to_owned(),
            description: "A classic strand of lustrous freshwater pearls with a \
                          modern clasp carrying the signature daisy motif."
                .to_owned(),
            details: strings(&[
                "AAA grade freshwater pearls",
                "Pearl size: 7-8mm",
                "18k gold signature clasp",
            ]),
            materials: strings(&["Freshwater Pearls", "18k Gold Clasp", "Silk Thread"]),
            care_instructions: strings(&[
                "Last on, first off rule",
                "Store flat, away from other jewelry",
                "Restring every 2-3 years",
            ]),
            is_new: false,
            is_bestseller: false,
            rating: 4.8,
            reviews: 156,
            in_stock: true,
            colors: None,
            sizes: None,
        },
        Product {
            id: ProductId::new(8),
            name: "Infinity Vine Ring".to_owned(),
            price: Decimal::from(195),
            original_price: None,
            images: strings(&["products/infinity-vine-ring.jpg"]),
            category: Category::Rings,
            collection: "Everyday Luxe".to_owned(),
            description: "Intertwining vines symbolizing endless growth, perfect for \
                          stacking or wearing alone."
                .to_owned(),
            details: strings(&[
                "Sterling silver with rhodium plating",
                "Band width: 1.5mm",
                "Stackable design",
            ]),
            materials: strings(&["Rhodium-Plated Sterling Silver", "Tarnish-Resistant"]),
            care_instructions: strings(&[
                "Ideal for everyday wear",
                "Store in soft pouch",
            ]),
            is_new: false,
            is_bestseller: false,
            rating: 4.7,
            reviews: 289,
            in_stock: true,
            colors: None,
            sizes: Some(strings(&["4", "5", "6", "7", "8", "9", "10"])),
        },
    ]
});

/// The static seed catalog, materialized once.
#[must_use]
pub fn catalog() -> &'static [Product] {
    &CATALOG
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<_> = catalog().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn test_ratings_in_bounds() {
        for p in catalog() {
            assert!((0.0..=5.0).contains(&p.rating), "{} rating out of bounds", p.name);
        }
    }

    #[test]
    fn test_discounted_pieces_have_higher_original_price() {
        for p in catalog() {
            if let Some(original) = p.original_price {
                assert!(original > p.price, "{} discount inverted", p.name);
            }
        }
    }

    #[test]
    fn test_every_piece_has_an_image() {
        for p in catalog() {
            assert!(!p.images.is_empty(), "{} has no image", p.name);
        }
    }
}
