use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 72;

/// How a skin splits the canonical lists into side-by-side columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub category_columns: usize,
    pub item_columns: usize,
}

impl ColumnLayout {
    pub const SINGLE: ColumnLayout = ColumnLayout {
        category_columns: 1,
        item_columns: 1,
    };

    pub const fn new(category_columns: usize, item_columns: usize) -> Self {
        Self {
            category_columns,
            item_columns,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontFamily {
    #[default]
    Serif,
    SansSerif,
    Monospace,
    Script,
    Display,
}

impl FontFamily {
    pub fn css_stack(&self) -> &'static str {
        match self {
            Self::Serif => "Georgia, 'Times New Roman', serif",
            Self::SansSerif => "'Helvetica Neue', Arial, sans-serif",
            Self::Monospace => "'Courier New', monospace",
            Self::Script => "'Brush Script MT', cursive",
            Self::Display => "Impact, 'Arial Black', sans-serif",
        }
    }
}

/// Built-in skins. Each renders the same document differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    #[default]
    Classic,
    Modern,
    Elegant,
    Rustic,
    Bistro,
    Cafe,
    Minimal,
    Vintage,
    Chalkboard,
    Coastal,
    Diner,
    Botanical,
}

impl TemplateId {
    pub fn all() -> &'static [TemplateId] {
        &[
            Self::Classic,
            Self::Modern,
            Self::Elegant,
            Self::Rustic,
            Self::Bistro,
            Self::Cafe,
            Self::Minimal,
            Self::Vintage,
            Self::Chalkboard,
            Self::Coastal,
            Self::Diner,
            Self::Botanical,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
            Self::Elegant => "elegant",
            Self::Rustic => "rustic",
            Self::Bistro => "bistro",
            Self::Cafe => "cafe",
            Self::Minimal => "minimal",
            Self::Vintage => "vintage",
            Self::Chalkboard => "chalkboard",
            Self::Coastal => "coastal",
            Self::Diner => "diner",
            Self::Botanical => "botanical",
        }
    }

    pub fn parse(s: &str) -> Option<TemplateId> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all().iter().copied().find(|t| t.as_str() == wanted)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Modern => "Modern",
            Self::Elegant => "Elegant",
            Self::Rustic => "Rustic",
            Self::Bistro => "Bistro",
            Self::Cafe => "Café",
            Self::Minimal => "Minimal",
            Self::Vintage => "Vintage",
            Self::Chalkboard => "Chalkboard",
            Self::Coastal => "Coastal",
            Self::Diner => "Diner",
            Self::Botanical => "Botanical",
        }
    }

    pub fn layout(&self) -> ColumnLayout {
        match self {
            Self::Classic | Self::Elegant | Self::Minimal | Self::Botanical => ColumnLayout::SINGLE,
            Self::Modern | Self::Bistro | Self::Chalkboard | Self::Coastal => ColumnLayout::new(2, 1),
            Self::Rustic | Self::Vintage => ColumnLayout::new(1, 2),
            Self::Cafe | Self::Diner => ColumnLayout::new(2, 2),
        }
    }

    /// Built-in look the skin ships with.
    pub fn default_customization(&self) -> Customization {
        let (background, text, accent, font, size) = match self {
            Self::Classic => ("#fffdf7", "#2b2b2b", "#8b0000", FontFamily::Serif, 16),
            Self::Modern => ("#ffffff", "#111827", "#2563eb", FontFamily::SansSerif, 15),
            Self::Elegant => ("#1c1c1c", "#f5f0e6", "#c9a227", FontFamily::Script, 18),
            Self::Rustic => ("#f4ecd8", "#3e2723", "#8d6e63", FontFamily::Serif, 16),
            Self::Bistro => ("#fdf6e3", "#222222", "#b22222", FontFamily::Serif, 15),
            Self::Cafe => ("#f7f1e8", "#4e342e", "#6d4c41", FontFamily::SansSerif, 14),
            Self::Minimal => ("#ffffff", "#000000", "#000000", FontFamily::SansSerif, 14),
            Self::Vintage => ("#efe6d0", "#3b2f2f", "#a0522d", FontFamily::Display, 17),
            Self::Chalkboard => ("#2f3b35", "#f0f0f0", "#ffd166", FontFamily::Script, 18),
            Self::Coastal => ("#eaf6fb", "#0b3954", "#1b98e0", FontFamily::SansSerif, 15),
            Self::Diner => ("#fff5f5", "#1a1a1a", "#e63946", FontFamily::Display, 16),
            Self::Botanical => ("#f1f7ee", "#1e3d2f", "#4f772d", FontFamily::Serif, 16),
        };
        Customization {
            background_color: background.to_string(),
            text_color: text.to_string(),
            accent_color: accent.to_string(),
            font_family: font,
            font_size: size,
            background_image: None,
        }
    }
}

/// Presentation-only settings layered over the active skin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub background_image: Option<String>,
}

impl Default for Customization {
    fn default() -> Self {
        TemplateId::default().default_customization()
    }
}

/// Shallow patch. `None` leaves a field alone; `background_image` takes
/// `Some(None)` to clear the image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomizationPatch {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_family: Option<FontFamily>,
    pub font_size: Option<u32>,
    pub background_image: Option<Option<String>>,
}

impl CustomizationPatch {
    pub fn is_empty(&self) -> bool {
        *self == CustomizationPatch::default()
    }
}

impl Customization {
    /// Merge `patch` into `self`. Returns whether anything changed.
    pub fn merge(&mut self, patch: &CustomizationPatch) -> bool {
        let before = self.clone();
        if let Some(color) = &patch.background_color {
            self.background_color = color.trim().to_string();
        }
        if let Some(color) = &patch.text_color {
            self.text_color = color.trim().to_string();
        }
        if let Some(color) = &patch.accent_color {
            self.accent_color = color.trim().to_string();
        }
        if let Some(font) = patch.font_family {
            self.font_family = font;
        }
        if let Some(size) = patch.font_size {
            self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        }
        if let Some(image) = &patch.background_image {
            self.background_image = image.clone().filter(|s| !s.trim().is_empty());
        }
        *self != before
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EditorMode {
    #[default]
    Edit,
    Preview,
}

fn default_font_size() -> u32 {
    16
}
