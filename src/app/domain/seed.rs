//! Starter documents a new editing session can open with.

use super::customization::TemplateId;
use super::ids::IdGenerator;
use super::menu::{Category, DietaryTag, Item, MenuDocument, RestaurantInfo};

struct SeedItem {
    name: &'static str,
    description: &'static str,
    price: f64,
    dietary: &'static [DietaryTag],
}

struct SeedCategory {
    name: &'static str,
    special: bool,
    items: &'static [SeedItem],
}

const RESTAURANT_MENU: &[SeedCategory] = &[
    SeedCategory {
        name: "Starters",
        special: false,
        items: &[
            SeedItem {
                name: "Tomato Soup",
                description: "Roasted tomatoes, basil, sourdough croutons",
                price: 7.5,
                dietary: &[DietaryTag::Vegetarian],
            },
            SeedItem {
                name: "Chicken Wings",
                description: "Six wings, house hot sauce",
                price: 9.0,
                dietary: &[DietaryTag::Spicy, DietaryTag::GlutenFree],
            },
        ],
    },
    SeedCategory {
        name: "Mains",
        special: false,
        items: &[
            SeedItem {
                name: "Grilled Salmon",
                description: "Lemon butter, seasonal greens",
                price: 22.0,
                dietary: &[DietaryTag::GlutenFree],
            },
            SeedItem {
                name: "Mushroom Risotto",
                description: "Arborio rice, wild mushrooms, parmesan",
                price: 18.0,
                dietary: &[DietaryTag::Vegetarian],
            },
        ],
    },
    SeedCategory {
        name: "Chef's Specials",
        special: true,
        items: &[SeedItem {
            name: "Braised Short Rib",
            description: "Slow cooked for eight hours",
            price: 28.0,
            dietary: &[],
        }],
    },
    SeedCategory {
        name: "Desserts",
        special: false,
        items: &[SeedItem {
            name: "Chocolate Torte",
            description: "Flourless, with sea salt",
            price: 8.0,
            dietary: &[DietaryTag::GlutenFree, DietaryTag::Vegetarian],
        }],
    },
];

const CAFE_MENU: &[SeedCategory] = &[
    SeedCategory {
        name: "Coffee",
        special: false,
        items: &[
            SeedItem {
                name: "Espresso",
                description: "Double shot",
                price: 3.0,
                dietary: &[DietaryTag::Vegan],
            },
            SeedItem {
                name: "Latte",
                description: "Whole or oat milk",
                price: 4.5,
                dietary: &[DietaryTag::Vegetarian],
            },
        ],
    },
    SeedCategory {
        name: "Pastries",
        special: false,
        items: &[SeedItem {
            name: "Butter Croissant",
            description: "Baked every morning",
            price: 3.5,
            dietary: &[DietaryTag::Vegetarian],
        }],
    },
    SeedCategory {
        name: "Today's Special",
        special: true,
        items: &[SeedItem {
            name: "Chai Cinnamon Bun",
            description: "",
            price: 4.0,
            dietary: &[],
        }],
    },
];

/// Build the default document for `template`, with fresh ids from `ids`.
pub fn starter_menu(template: TemplateId, ids: &mut IdGenerator, currency: &str) -> MenuDocument {
    let (title, seed) = match template {
        TemplateId::Cafe | TemplateId::Diner | TemplateId::Chalkboard => ("Café Menu", CAFE_MENU),
        _ => ("Restaurant Menu", RESTAURANT_MENU),
    };

    let mut doc = MenuDocument::empty(&ids.next_raw(), title);
    doc.restaurant_info = RestaurantInfo {
        name: "Your Restaurant".to_string(),
        ..Default::default()
    };

    for seed_category in seed {
        let mut category = Category::new(ids.next_category_id(), seed_category.name);
        category.is_special = seed_category.special;
        for seed_item in seed_category.items {
            let mut item = Item::new(ids.next_item_id(), seed_item.name, currency);
            if !seed_item.description.is_empty() {
                item.description = Some(seed_item.description.to_string());
            }
            item.price = Some(seed_item.price);
            item.dietary_info = seed_item.dietary.iter().copied().collect();
            category.items.push(item);
        }
        doc.categories.push(category);
    }
    doc
}
