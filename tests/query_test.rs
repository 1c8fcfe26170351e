//! Integration tests for the public search path.
//!
//! Tests verify that:
//! - Only published tools are ever returned
//! - Each filter field is applied independently and combined with AND
//! - Matching is case-insensitive
//! - Result order follows the catalog order

use std::sync::Arc;
use tool_catalog::CatalogStore;
use tool_catalog::models::{CreateToolRequest, ListInput, Tool, ToolFilter};
use tool_catalog::services::{AdminService, categories, search};

fn tool(
    id: u64,
    name: &str,
    description: &str,
    category: &str,
    pricing: &str,
    tags: &[&str],
    published: bool,
) -> Tool {
    Tool {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        pricing: pricing.to_string(),
        pricing_details: String::new(),
        website: format!("https://tool{id}.example.com"),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        features: vec![],
        published,
    }
}

fn catalog() -> Vec<Tool> {
    vec![
        tool(
            1,
            "ChatGPT",
            "Conversational assistant",
            "Chatbot",
            "Free/Paid",
            &["LLM", "chat"],
            true,
        ),
        tool(
            2,
            "Midjourney",
            "Image generation from prompts",
            "Image",
            "Paid",
            &["art"],
            true,
        ),
        tool(
            3,
            "Copilot",
            "AI pair programmer",
            "Coding",
            "Paid",
            &["code", "llm"],
            true,
        ),
        tool(
            4,
            "Stable Diffusion",
            "Open image model",
            "Image",
            "Free",
            &["art", "open-source"],
            true,
        ),
        tool(
            5,
            "Secret Draft",
            "Chat tool not launched yet",
            "Chatbot",
            "Free",
            &["chat"],
            false,
        ),
        tool(
            6,
            "Claude",
            "Helpful chat assistant",
            "Chatbot",
            "Free/Paid",
            &["LLM"],
            true,
        ),
    ]
}

fn ids(tools: &[Tool]) -> Vec<u64> {
    tools.iter().map(|t| t.id).collect()
}

#[test]
fn test_no_filter_returns_all_published_in_order() {
    let found = search(&catalog(), &ToolFilter::default());
    assert_eq!(ids(&found), vec![1, 2, 3, 4, 6]);
}

#[test]
fn test_search_matches_name_description_or_tag() {
    let tools = catalog();

    let matching = |text: &str| ids(&search(&tools, &ToolFilter::default().with_search(text)));

    // name
    assert_eq!(matching("copi"), vec![3]);
    // description
    assert_eq!(matching("PROMPTS"), vec![2]);
    // tag
    assert_eq!(matching("open-"), vec![4]);
    // any of them, case-insensitive
    assert_eq!(matching("llm"), vec![1, 3, 6]);
}

#[test]
fn test_search_never_returns_drafts() {
    let found = search(&catalog(), &ToolFilter::default().with_search("chat"));
    assert_eq!(ids(&found), vec![1, 6]);
}

#[test]
fn test_category_is_case_insensitive_exact() {
    let tools = catalog();
    let in_category =
        |value: &str| ids(&search(&tools, &ToolFilter::default().with_category(value)));

    assert_eq!(in_category("image"), vec![2, 4]);
    assert!(in_category("Imag").is_empty());
}

#[test]
fn test_pricing_is_case_insensitive_exact() {
    let tools = catalog();
    let priced = |value: &str| ids(&search(&tools, &ToolFilter::default().with_pricing(value)));

    assert_eq!(priced("PAID"), vec![2, 3]);
    assert_eq!(priced("free/paid"), vec![1, 6]);
}

#[test]
fn test_filters_combine_with_and() {
    let tools = catalog();
    let filter = ToolFilter::default()
        .with_search("llm")
        .with_category("chatbot")
        .with_pricing("free/paid");
    assert_eq!(ids(&search(&tools, &filter)), vec![1, 6]);

    let filter = ToolFilter::default().with_search("art").with_pricing("free");
    assert_eq!(ids(&search(&tools, &filter)), vec![4]);

    let filter = ToolFilter::default().with_category("coding").with_pricing("free");
    assert!(search(&tools, &filter).is_empty());
}

#[test]
fn test_every_result_satisfies_every_predicate() {
    let tools = catalog();
    let searches = [None, Some("a"), Some("chat"), Some("LLM"), Some("zzz")];
    let category_values = [None, Some("chatbot"), Some("IMAGE"), Some("coding")];
    let pricings = [None, Some("free"), Some("paid"), Some("Free/Paid")];

    for s in searches {
        for c in category_values {
            for p in pricings {
                let filter = ToolFilter {
                    search: s.map(str::to_string),
                    category: c.map(str::to_string),
                    pricing: p.map(str::to_string),
                };
                let found = search(&tools, &filter);

                let expected: Vec<u64> = tools
                    .iter()
                    .filter(|t| t.published)
                    .filter(|t| {
                        s.is_none_or(|s| {
                            let s = s.to_lowercase();
                            t.name.to_lowercase().contains(&s)
                                || t.description.to_lowercase().contains(&s)
                                || t.tags.iter().any(|tag| tag.to_lowercase().contains(&s))
                        })
                    })
                    .filter(|t| c.is_none_or(|c| t.category.eq_ignore_ascii_case(c)))
                    .filter(|t| p.is_none_or(|p| t.pricing.eq_ignore_ascii_case(p)))
                    .map(|t| t.id)
                    .collect();

                assert_eq!(ids(&found), expected, "filter: {:?}", filter);
            }
        }
    }
}

#[test]
fn test_categories_only_from_published() {
    let mut tools = catalog();
    tools.push(tool(7, "Hidden", "x", "Audio", "Free", &[], false));
    assert_eq!(categories(&tools), vec!["Chatbot", "Coding", "Image"]);
}

#[tokio::test]
async fn test_publish_toggle_controls_search_visibility() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CatalogStore::open(dir.path().join("tools.json")).await.unwrap());
    let admin = AdminService::new(store.clone());

    let tool = admin
        .create(CreateToolRequest {
            name: "Perplexity".to_string(),
            description: "Answer engine".to_string(),
            category: "Search".to_string(),
            pricing: "Free".to_string(),
            pricing_details: None,
            website: "https://perplexity.ai".to_string(),
            tags: ListInput::Text("search, answers".to_string()),
            features: ListInput::default(),
            published: false,
        })
        .await
        .unwrap();

    let filter = ToolFilter::default().with_search("perplex");
    assert!(search(&store.load_all().await, &filter).is_empty());

    admin.set_published(tool.id, true).await.unwrap();
    assert_eq!(ids(&search(&store.load_all().await, &filter)), vec![tool.id]);

    admin.set_published(tool.id, false).await.unwrap();
    assert!(search(&store.load_all().await, &filter).is_empty());
}
