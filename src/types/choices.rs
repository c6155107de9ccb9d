//! Coded game fields and their display labels
//!
//! Drop records store enumerated attributes (rune set, quality, stats, ...) as
//! integer or short string codes. Aggregation groups on the raw codes; the
//! label tables here are applied afterwards as a pure mapping step.

use serde::{Deserialize, Serialize};

/// Defines an integer-coded choice enum with its label lookup table.
macro_rules! int_choices {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident = $code:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every choice, in code order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn code(&self) -> i64 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Label for a raw code; codes newer than this table still render
            pub fn label_for(code: i64) -> String {
                Self::from_code(code)
                    .map(|choice| choice.label().to_string())
                    .unwrap_or_else(|| format!("Unknown ({})", code))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    };
}

int_choices! {
    /// Rune set
    RuneType {
        Energy = 1 => "Energy",
        Guard = 2 => "Guard",
        Swift = 3 => "Swift",
        Blade = 4 => "Blade",
        Rage = 5 => "Rage",
        Focus = 6 => "Focus",
        Endure = 7 => "Endure",
        Fatal = 8 => "Fatal",
        Despair = 10 => "Despair",
        Vampire = 11 => "Vampire",
        Violent = 13 => "Violent",
        Nemesis = 14 => "Nemesis",
        Will = 15 => "Will",
        Shield = 16 => "Shield",
        Revenge = 17 => "Revenge",
        Destroy = 18 => "Destroy",
        Fight = 19 => "Fight",
        Determination = 20 => "Determination",
        Enhance = 21 => "Enhance",
        Accuracy = 22 => "Accuracy",
        Tolerance = 23 => "Tolerance",
        Immemorial = 99 => "Immemorial",
    }
}

int_choices! {
    /// Rune (and craft material) quality
    RuneQuality {
        Normal = 0 => "Normal",
        Magic = 1 => "Magic",
        Rare = 2 => "Rare",
        Hero = 3 => "Hero",
        Legend = 4 => "Legend",
        AncientNormal = 5 => "Ancient Normal",
        AncientMagic = 6 => "Ancient Magic",
        AncientRare = 7 => "Ancient Rare",
        AncientHero = 8 => "Ancient Hero",
        AncientLegend = 9 => "Ancient Legend",
    }
}

int_choices! {
    /// Rune main, innate and sub stats
    RuneStat {
        Hp = 1 => "HP",
        HpPercent = 2 => "HP %",
        Atk = 3 => "ATK",
        AtkPercent = 4 => "ATK %",
        Def = 5 => "DEF",
        DefPercent = 6 => "DEF %",
        Spd = 7 => "SPD",
        CritRate = 8 => "CRI Rate %",
        CritDamage = 9 => "CRI Dmg %",
        Resistance = 10 => "Resistance %",
        Accuracy = 11 => "Accuracy %",
    }
}

int_choices! {
    /// Rune crafting material kind
    CraftType {
        EnchantGem = 0 => "Enchant Gem",
        Grindstone = 1 => "Grindstone",
        ImmemorialGem = 2 => "Immemorial Gem",
        ImmemorialGrindstone = 3 => "Immemorial Grindstone",
        AncientGem = 4 => "Ancient Gem",
        AncientGrindstone = 5 => "Ancient Grindstone",
    }
}

int_choices! {
    /// Game item category
    ItemCategory {
        Monster = 1 => "Monster",
        Currency = 6 => "Currency",
        Rune = 8 => "Rune",
        SummonScroll = 9 => "Summoning Scroll",
        Booster = 10 => "Booster",
        Essence = 11 => "Essence",
        MonsterPiece = 12 => "Monster Piece",
        GuildMonsterPiece = 19 => "Guild Monster Piece",
        Rainbowmon = 25 => "Rainbowmon",
        RuneCraft = 27 => "Rune Craft",
        CraftingMaterial = 29 => "Crafting Material",
        MaterialMonster = 61 => "Material Monster",
        Artifact = 73 => "Artifact",
        ArtifactCraft = 75 => "Artifact Crafting Material",
    }
}

int_choices! {
    /// Rift dungeon clear grade
    RiftGrade {
        F = 1 => "F",
        D = 2 => "D",
        C = 3 => "C",
        BMinus = 4 => "B-",
        B = 5 => "B",
        BPlus = 6 => "B+",
        AMinus = 7 => "A-",
        A = 8 => "A",
        APlus = 9 => "A+",
        S = 10 => "S",
        SS = 11 => "SS",
        SSS = 12 => "SSS",
    }
}

/// Monster element. Stored as a lowercase string code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Pure,
    Fire,
    Wind,
    Water,
    Light,
    Dark,
}

impl Element {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pure" => Some(Element::Pure),
            "fire" => Some(Element::Fire),
            "wind" => Some(Element::Wind),
            "water" => Some(Element::Water),
            "light" => Some(Element::Light),
            "dark" => Some(Element::Dark),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Element::Pure => "pure",
            Element::Fire => "fire",
            Element::Wind => "wind",
            Element::Water => "water",
            Element::Light => "light",
            Element::Dark => "dark",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Element::Pure => "Pure",
            Element::Fire => "Fire",
            Element::Wind => "Wind",
            Element::Water => "Water",
            Element::Light => "Light",
            Element::Dark => "Dark",
        }
    }

    pub fn label_for(code: &str) -> String {
        Self::from_code(code)
            .map(|element| element.label().to_string())
            .unwrap_or_else(|| format!("Unknown ({})", code))
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Label for an optional stat column (innate stats are nullable)
pub fn optional_stat_label(code: Option<i64>) -> String {
    match code {
        Some(code) => RuneStat::label_for(code),
        None => "None".to_string(),
    }
}
