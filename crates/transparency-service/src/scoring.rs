/// Keyword/length heuristics that rate how much a product description discloses.
///
/// Pure and deterministic: no I/O, no shared state. Missing fields count as empty.
use serde::{Deserialize, Serialize, Serializer};

pub const MAX_SCORE: u32 = 100;

const BASIC_FIELD_POINTS: u32 = 10;

/// `(length must exceed, points awarded)`; tiers are cumulative.
const DESCRIPTION_TIERS: [(usize, u32); 3] = [(50, 10), (100, 5), (200, 5)];

const INGREDIENT_POINTS: u32 = 20;
const CERTIFICATION_POINTS: u32 = 15;
const MANUFACTURING_POINTS: u32 = 15;

const INGREDIENT_KEYWORDS: &[&str] =
    &["ingredient", "material", "component", "made of", "contains"];
const CERTIFICATION_KEYWORDS: &[&str] = &[
    "organic",
    "certified",
    "fair trade",
    "cruelty-free",
    "sustainable",
    "eco-friendly",
];
const MANUFACTURING_KEYWORDS: &[&str] =
    &["manufactured", "produced", "factory", "made in", "sourced from"];

pub const RECOMMEND_INGREDIENTS: &str = "Add detailed ingredient or material information.";
pub const RECOMMEND_CERTIFICATIONS: &str = "Include any relevant certifications or standards.";
pub const RECOMMEND_MANUFACTURING: &str = "Provide manufacturing or sourcing information.";
pub const RECOMMEND_DESCRIPTION: &str = "Expand product description with more details.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub basic_info: u32,
    pub description_quality: u32,
    pub ingredient_transparency: u32,
    pub certifications: u32,
    pub manufacturing_info: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        let sum = self.basic_info
            + self.description_quality
            + self.ingredient_transparency
            + self.certifications
            + self.manufacturing_info;
        sum.min(MAX_SCORE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Lower bounds are inclusive.
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "A - Excellent Transparency",
            Grade::B => "B - Good Transparency",
            Grade::C => "C - Moderate Transparency",
            Grade::D => "D - Limited Transparency",
            Grade::F => "F - Poor Transparency",
        }
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub recommendations: Vec<&'static str>,
    pub grade: Grade,
}

pub fn calculate_score(product: &ProductData) -> ScoreResult {
    let description = product.description.as_deref().unwrap_or_default();
    let lowered = description.to_lowercase();

    let basic_info = [&product.name, &product.category, &product.company_name]
        .into_iter()
        .filter(|field| is_present(field))
        .count() as u32
        * BASIC_FIELD_POINTS;

    let length = description.chars().count();
    let description_quality = DESCRIPTION_TIERS
        .iter()
        .filter(|(threshold, _)| length > *threshold)
        .map(|(_, points)| points)
        .sum();

    let breakdown = ScoreBreakdown {
        basic_info,
        description_quality,
        ingredient_transparency: keyword_points(
            &lowered,
            INGREDIENT_KEYWORDS,
            INGREDIENT_POINTS,
        ),
        certifications: keyword_points(
            &lowered,
            CERTIFICATION_KEYWORDS,
            CERTIFICATION_POINTS,
        ),
        manufacturing_info: keyword_points(
            &lowered,
            MANUFACTURING_KEYWORDS,
            MANUFACTURING_POINTS,
        ),
    };

    let score = breakdown.total();
    ScoreResult {
        score,
        breakdown,
        recommendations: recommendations(&breakdown),
        grade: Grade::from_score(score),
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

/// Flat award: any number of matching keywords earns the points once.
fn keyword_points(lowered: &str, keywords: &[&str], points: u32) -> u32 {
    if keywords.iter().any(|k| lowered.contains(k)) {
        points
    } else {
        0
    }
}

fn recommendations(breakdown: &ScoreBreakdown) -> Vec<&'static str> {
    let mut out = Vec::new();
    if breakdown.ingredient_transparency < 15 {
        out.push(RECOMMEND_INGREDIENTS);
    }
    if breakdown.certifications < 10 {
        out.push(RECOMMEND_CERTIFICATIONS);
    }
    if breakdown.manufacturing_info < 10 {
        out.push(RECOMMEND_MANUFACTURING);
    }
    if breakdown.description_quality < 15 {
        out.push(RECOMMEND_DESCRIPTION);
    }
    out
}
