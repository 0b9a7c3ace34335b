/// Display metadata for one citation folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub slug: String,
    pub name: String,
    pub description: String,
}

/// Known categories, in the order the site lists them.
pub static CATEGORIES: &[(&str, &str, &str)] = &[
    (
        "surveys",
        "Surveys and Bibliometric Analyses",
        "Literature and systematic reviews of long-tailed learning in healthcare",
    ),
    (
        "data-balancing",
        "Data Balancing",
        "Resampling and synthetic data generation techniques for addressing class imbalance",
    ),
    (
        "neural-architecture",
        "Neural Architecture",
        "Specialized network designs and architectural modifications for imbalanced data",
    ),
    (
        "feature-enrichment",
        "Feature Enrichment",
        "Representation learning to produce more discriminative embeddings for minority classes",
    ),
    (
        "logits-adjustment",
        "Logits Adjustment",
        "Modify classifier outputs to compensate for class frequency disparities",
    ),
    (
        "loss-functions",
        "Loss Functions",
        "Loss function design for class-imbalanced learning",
    ),
    (
        "foundation-models",
        "Foundation Models",
        "Addressing long-tailed distributions through transfer learning and efficient adaptation.",
    ),
    (
        "multimodality",
        "Multi-modality",
        "Multi-modal learning approaches addressing missing modalities and class imbalance",
    ),
    (
        "fairness",
        "Fairness, Bias, and Health Equity",
        "Methods addressing demographic imbalances and algorithmic fairness in healthcare",
    ),
    (
        "rare-disease",
        "Rare Disease and Epidemiological Modeling",
        "Specialized approaches for extremely rare conditions and few-shot medical scenarios",
    ),
];

pub fn is_known(slug: &str) -> bool {
    CATEGORIES.iter().any(|(s, _, _)| *s == slug)
}

/// Taxonomy file names for every known category, `<slug>.json`.
pub fn default_documents() -> Vec<String> {
    CATEGORIES.iter().map(|(slug, _, _)| format!("{}.json", slug)).collect()
}

impl CategoryInfo {
    /// Metadata for `slug`; unknown slugs get a title-cased name and no description.
    pub fn for_slug(slug: &str) -> CategoryInfo {
        match CATEGORIES.iter().find(|(s, _, _)| *s == slug) {
            Some((s, name, description)) => CategoryInfo {
                slug: s.to_string(),
                name: name.to_string(),
                description: description.to_string(),
            },
            None => CategoryInfo {
                slug: slug.to_string(),
                name: title_case(&slug.replace('-', " ")),
                description: String::new(),
            },
        }
    }
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_slug_uses_table() {
        let info = CategoryInfo::for_slug("fairness");
        assert_eq!(info.name, "Fairness, Bias, and Health Equity");
        assert!(is_known("rare-disease"));
    }

    #[test]
    fn unknown_slug_is_title_cased() {
        let info = CategoryInfo::for_slug("active-learning");
        assert_eq!(info.name, "Active Learning");
        assert_eq!(info.description, "");
        assert!(!is_known("active-learning"));
    }

    #[test]
    fn default_documents_follow_table_order() {
        let docs = default_documents();
        assert_eq!(docs.len(), 10);
        assert_eq!(docs[0], "surveys.json");
        assert_eq!(docs[9], "rare-disease.json");
    }
}
