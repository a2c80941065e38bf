//! Hook library - categorized hook templates with search

use std::str::FromStr;

use crate::model::HookCategory;
use crate::ports::{Clipboard, HookSource};

/// Embedded copy of the hook data, used when the remote source is unreachable
const EMBEDDED_HOOKS: &[(&str, &str, &[&str])] = &[
    (
        "question",
        "Question Hooks",
        &[
            "So I asked, 'What's the best way to {outcome}?'",
            "Want to {outcome}? Here's how...",
            "How do you {action} that {outcome}?",
            "You don't {outcome} based on {common activity}?",
            "If you want to {outcome}, this thread shares {number} ways to do it:",
            "If you suffer from {pain_point}... I eventually overcame it. {number} things happened:",
            "Want to {outcome}? {action}. This is a small change that can make a huge difference.",
        ],
    ),
    (
        "challenge",
        "Challenge Common Beliefs",
        &[
            "{common_belief} Wrong. {topic} can totally change your life.",
            "Most people are trying to {outcome} the hard way. Here's the easy way...",
            "You don't {outcome} based on {common activity}...",
            "{niche} is super competitive. But with the proper system, you can stand out.",
            "{skill} is a superpower. It's the key to {outcome}",
            "{skill} gives you competitive advantage. But most things you've been told are lies.",
            "These are the {number} lies you were told about {topic}",
        ],
    ),
    (
        "story",
        "Story Hooks",
        &[
            "I failed to {action} 3 times. Then I tried this...",
            "In {time_period}, I went from {past} to {present}...",
            "Here's how I {outcome} with ZERO experience...",
            "I spent {amount} on {tools} in the past {time_period}",
            "I've been {doing_what} for {time_period}. This is the advice I'd give myself.",
            "The single best thing I've done in my life: {achievement}",
            "{platform} allowed me to 10x my {outcome}",
        ],
    ),
    (
        "authority",
        "Authority Hooks",
        &[
            "I studied the top {number} {experts} in {field}...",
            "In a rare {expert} interview, they revealed...",
            "{expert} turned {small} into {big}...",
            "Leading experts reveal the truth about {topic}...",
            "New research shows surprising facts about {topic}...",
            "Industry insiders share game-changing insights on {topic}...",
            "The KING of {platform}: {expert_name}. Over the {time_period}, they've {achievement}",
        ],
    ),
    (
        "stats",
        "Statistics & Numbers",
        &[
            "{number} things {authority} didn't teach me about {topic}",
            "I read {number} {content_type} and discovered why they went viral",
            "These are the {number} strategies that give you the highest ROI in {niche}",
            "If you use it right, {platform} is worth more than your degree. Here are {number} ways to {outcome}",
            "{percentage} of people get this wrong about {topic}. Here's the truth...",
        ],
    ),
];

/// Which categories a search covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    All,
    Category(String),
}

impl FromStr for CategorySelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(CategorySelection::All)
        } else {
            Ok(CategorySelection::Category(trimmed.to_string()))
        }
    }
}

/// Read-only library of hook categories in declared order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookLibrary {
    categories: Vec<HookCategory>,
}

impl HookLibrary {
    pub fn new(categories: Vec<HookCategory>) -> Self {
        Self { categories }
    }

    /// The embedded hook data
    pub fn embedded() -> Self {
        let categories = EMBEDDED_HOOKS
            .iter()
            .map(|(id, title, examples)| HookCategory {
                id: id.to_string(),
                title: title.to_string(),
                examples: examples.iter().map(|e| e.to_string()).collect(),
            })
            .collect();
        Self { categories }
    }

    /// Load from `source`, falling back to the embedded copy on failure
    pub async fn load<H: HookSource + ?Sized>(source: &H) -> Self {
        match source.fetch().await {
            Ok(categories) if !categories.is_empty() => {
                tracing::info!(categories = categories.len(), "Loaded hooks from remote source");
                Self::new(categories)
            }
            Ok(_) => {
                tracing::warn!("Remote hook source returned no categories, using embedded hooks");
                Self::embedded()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch hooks, using embedded hooks");
                Self::embedded()
            }
        }
    }

    pub fn categories(&self) -> &[HookCategory] {
        &self.categories
    }

    /// Category ids and titles in declared order
    pub fn list_categories(&self) -> Vec<(&str, &str)> {
        self.categories
            .iter()
            .map(|c| (c.id.as_str(), c.title.as_str()))
            .collect()
    }

    /// Case-insensitive substring search over the selected categories.
    ///
    /// Results keep declaration order. An unknown category yields nothing.
    pub fn search(&self, selection: &CategorySelection, term: &str) -> Vec<&str> {
        let needle = term.to_lowercase();

        self.categories
            .iter()
            .filter(|category| match selection {
                CategorySelection::All => true,
                CategorySelection::Category(id) => category.id == *id,
            })
            .flat_map(|category| category.examples.iter())
            .filter(|example| needle.is_empty() || example.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Ordered JSON mapping of category id to `{ title, examples }`
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .categories
            .iter()
            .map(|c| {
                (
                    c.id.clone(),
                    serde_json::json!({
                        "title": c.title,
                        "examples": c.examples,
                    }),
                )
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Copy `text` to the clipboard. Failures are logged, never returned.
pub async fn copy_to_clipboard<C: Clipboard + ?Sized>(clipboard: &C, text: &str) {
    match clipboard.copy(text).await {
        Ok(()) => tracing::debug!(chars = text.chars().count(), "Copied hook to clipboard"),
        Err(e) => tracing::warn!(error = %e, "Failed to copy to clipboard"),
    }
}
