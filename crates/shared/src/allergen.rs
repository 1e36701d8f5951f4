use std::collections::BTreeSet;

/// Known spellings that always expand together: declaring any member of a
/// group pulls in the whole group.
const SYNONYMS: &[&[&str]] = &[
    &["egg", "eggs"],
    &["milk", "dairy"],
    &["fish", "fishes"],
    &["nut", "nuts", "tree nut", "tree nuts"],
    &["shellfish", "seafood"],
];

/// Allergen families pulled in whole when extended matching is enabled.
const FAMILIES: &[&[&str]] = &[
    &[
        "milk",
        "dairy",
        "lactose",
        "casein",
        "whey",
        "butter",
        "cream",
        "cheese",
        "yogurt",
        "sour cream",
        "cream cheese",
        "ice cream",
    ],
    &["eggs", "egg", "egg white", "egg yolk", "albumin"],
    &["peanuts", "peanut", "peanut butter", "groundnut"],
    &[
        "almonds",
        "walnuts",
        "cashews",
        "pistachios",
        "hazelnuts",
        "brazil nuts",
        "pecans",
        "macadamia nuts",
        "pine nuts",
        "chestnuts",
        "tree nuts",
    ],
    &[
        "soy",
        "soya",
        "soybean",
        "tofu",
        "tempeh",
        "miso",
        "soy sauce",
        "edamame",
    ],
    &[
        "fish",
        "salmon",
        "tuna",
        "cod",
        "halibut",
        "sardines",
        "anchovies",
        "mackerel",
        "trout",
    ],
    &[
        "shellfish",
        "shrimp",
        "crab",
        "lobster",
        "oysters",
        "mussels",
        "clams",
        "scallops",
        "prawns",
    ],
    &[
        "wheat", "flour", "bread", "pasta", "cereals", "crackers", "cookies",
    ],
    &["sesame", "sesame seeds", "tahini", "sesame oil"],
    &[
        "gluten",
        "wheat",
        "barley",
        "rye",
        "oats",
        "spelt",
        "kamut",
        "triticale",
        "bulgur",
        "semolina",
        "durum",
    ],
    &["sulphites", "sulfites", "sulfur dioxide", "sodium sulfite"],
    &["corn", "maize", "corn starch", "corn syrup", "cornmeal"],
    &["mustard", "mustard seeds", "dijon mustard"],
    &["celery", "celery seeds", "celeriac"],
    &["lupin", "lupine"],
    &["coconut", "coconut oil", "coconut milk", "coconut cream"],
    &["yeast", "nutritional yeast", "bakers yeast"],
    &["chocolate", "cocoa", "cacao", "dark chocolate", "milk chocolate"],
    &["tomatoes", "tomato", "tomato sauce", "ketchup", "marinara"],
    &["citrus", "lemon", "lime", "orange", "grapefruit", "tangerine"],
];

/// Ingredient names a variant substring would wrongly flag.
const SAFE_NAMES: &[&str] = &["eggplant"];

/// Lexical expansion of a user's declared allergens.
///
/// The same index value must be used for catalog tiles and for the recipe
/// defensive filter so both paths agree on what is unsafe.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllergenIndex {
    variants: BTreeSet<String>,
}

impl AllergenIndex {
    /// Expands names with the mechanical plural/singular rule and the
    /// synonym table.
    pub fn expand<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(names, false)
    }

    /// Same as [`AllergenIndex::expand`], additionally pulling in every known
    /// allergen family a declared name belongs to.
    pub fn expand_extended<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(names, true)
    }

    fn build<I, S>(names: I, extended: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut variants = BTreeSet::new();

        for name in names {
            let name = crate::normalize_name(name.as_ref());
            if name.is_empty() {
                continue;
            }

            match name.strip_suffix('s') {
                Some(singular) if !singular.is_empty() => {
                    variants.insert(singular.to_owned());
                }
                Some(_) => {}
                None => {
                    variants.insert(format!("{name}s"));
                }
            }

            for group in SYNONYMS.iter().filter(|g| g.contains(&name.as_str())) {
                variants.extend(group.iter().map(|s| s.to_string()));
            }

            if extended {
                for family in FAMILIES.iter().filter(|f| f.contains(&name.as_str())) {
                    variants.extend(family.iter().map(|s| s.to_string()));
                }
            }

            variants.insert(name);
        }

        Self { variants }
    }

    pub fn variants(&self) -> &BTreeSet<String> {
        &self.variants
    }

    pub fn into_variants(self) -> BTreeSet<String> {
        self.variants
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Returns true when `text` (case-insensitive) contains any variant as a
    /// substring. Names listed as known false positives never match.
    ///
    /// A declared "cashews" flags "cashew" only because "cashew" is in the
    /// variant set, not because "cashew" contains "cashews".
    pub fn matches(&self, text: &str) -> bool {
        let text = crate::normalize_name(text);
        if text.is_empty() || SAFE_NAMES.contains(&text.as_str()) {
            return false;
        }

        self.variants.iter().any(|v| text.contains(v.as_str()))
    }

    /// True when none of `texts` match.
    pub fn is_safe<I, S>(&self, texts: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        !texts.into_iter().any(|t| self.matches(t.as_ref()))
    }
}
