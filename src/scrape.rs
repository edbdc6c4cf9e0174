use crate::context::{
    MAX_VISIBLE_SNIPPETS, PageContextProvider, parse_meal_row, parse_workout_heading,
    truncate_snippet,
};
use crate::models::{ChatContext, PageContent, WorkoutDay};
use crate::storage::{LocalStore, USER_DATA_KEY};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::debug;

const MIN_SNIPPET_CHARS: usize = 10;

/// An HTML page plus the local store that sits next to it in the browser.
///
/// The document is parsed again on every [`PageContextProvider::gather`], so
/// a page swapped in with [`HtmlPage::navigate`] is picked up by the next send.
#[derive(Debug)]
pub struct HtmlPage {
    document: RwLock<PageDocument>,
    store: Option<LocalStore>,
}

#[derive(Debug, Clone)]
struct PageDocument {
    html: String,
    path: String,
}

impl HtmlPage {
    pub fn new(html: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(PageDocument {
                html: html.into(),
                path: path.into(),
            }),
            store: None,
        }
    }

    pub fn with_store(mut self, store: LocalStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Downloads `url` and uses its path as the current page.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Self, reqwest::Error> {
        let response = client.get(url).send().await?.error_for_status()?;
        let path = response.url().path().to_string();
        let html = response.text().await?;
        Ok(Self::new(html, path))
    }

    pub fn navigate(&self, html: impl Into<String>, path: impl Into<String>) {
        let mut document = self.document.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        document.html = html.into();
        document.path = path.into();
    }

    fn snapshot(&self) -> PageDocument {
        self.document
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PageContextProvider for HtmlPage {
    fn gather(&self) -> ChatContext {
        let PageDocument { html, path } = self.snapshot();
        let document = Html::parse_document(&html);

        let mut user_data = scrape_profile_rows(&document);
        user_data.extend(scrape_form_inputs(&document));
        if let Some(store) = &self.store {
            merge_stored_user_data(store, &mut user_data);
        }

        let context = ChatContext {
            user_data,
            workout_plan: scrape_workout_plan(&document),
            diet_plan: scrape_diet_plan(&document),
            health_metrics: scrape_health_metrics(&document),
            page_content: scrape_page_content(&document),
            current_page: path,
        };
        debug!(
            page = %context.current_page,
            user_fields = context.user_data.len(),
            workout_days = context.workout_plan.len(),
            diet_days = context.diet_plan.len(),
            "gathered page context"
        );
        context
    }
}

fn select<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(err) => {
            debug!("skipping selector {css}: {err:?}");
            Vec::new()
        }
    }
}

/// Element text with runs of whitespace collapsed to single spaces.
fn text_of(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn hides(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if matches!(value.name(), "head" | "template" | "script" | "style" | "noscript") {
        return true;
    }
    if value.attr("hidden").is_some() || value.classes().any(|class| class == "d-none") {
        return true;
    }
    value.attr("style").is_some_and(|style| {
        let style = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        style.contains("display:none") || style.contains("visibility:hidden")
    })
}

fn is_rendered(element: ElementRef<'_>) -> bool {
    !hides(element) && !element.ancestors().filter_map(ElementRef::wrap).any(hides)
}

fn scrape_profile_rows(document: &Html) -> BTreeMap<String, String> {
    let mut rows = BTreeMap::new();
    for row in select(document.root_element(), ".list-group-item") {
        let Some(badge) = select(row, ".badge").into_iter().next() else {
            continue;
        };
        let value = text_of(badge);
        let label = text_of(row).replacen(&value, "", 1).trim().to_string();
        if !label.is_empty() && !value.is_empty() {
            rows.insert(label, value);
        }
    }
    rows
}

fn scrape_form_inputs(document: &Html) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for input in select(document.root_element(), "input, select") {
        let Some(name) = input.value().attr("name").filter(|name| !name.is_empty()) else {
            continue;
        };
        let value = if input.value().name() == "select" {
            selected_option(input)
        } else {
            input.value().attr("value").map(str::to_string)
        };
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            fields.insert(name.to_string(), value);
        }
    }
    fields
}

fn selected_option(select_element: ElementRef<'_>) -> Option<String> {
    let options = select(select_element, "option");
    let chosen = options
        .iter()
        .find(|option| option.value().attr("selected").is_some())
        .or_else(|| options.first())?;
    Some(
        chosen
            .value()
            .attr("value")
            .map(str::to_string)
            .unwrap_or_else(|| text_of(*chosen)),
    )
}

fn merge_stored_user_data(store: &LocalStore, user_data: &mut BTreeMap<String, String>) {
    let Some(raw) = store.get(USER_DATA_KEY) else {
        return;
    };
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(entries)) => {
            for (key, value) in entries {
                let value = match value {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                };
                user_data.insert(key, value);
            }
        }
        Ok(_) => debug!("stored user data is not an object, ignoring it"),
        Err(err) => debug!("ignoring malformed stored user data: {err}"),
    }
}

fn scrape_workout_plan(document: &Html) -> BTreeMap<String, WorkoutDay> {
    let mut plan = BTreeMap::new();
    for item in select(document.root_element(), ".accordion-item") {
        let Some(button) = select(item, ".accordion-button").into_iter().next() else {
            continue;
        };
        let Some((day, focus)) = parse_workout_heading(&text_of(button)) else {
            continue;
        };
        let exercises = select(item, ".list-group-item").into_iter().map(text_of).collect();
        plan.insert(day, WorkoutDay { focus, exercises });
    }
    plan
}

fn scrape_diet_plan(document: &Html) -> BTreeMap<String, BTreeMap<String, String>> {
    let mut plan = BTreeMap::new();
    for card in select(document.root_element(), ".card") {
        let Some(title) = select(card, ".card-title").into_iter().next() else {
            continue;
        };
        let day = text_of(title);
        if !day.contains("Day") {
            continue;
        }
        let meals = select(card, ".list-group-item")
            .into_iter()
            .filter_map(|row| parse_meal_row(&text_of(row)))
            .collect();
        plan.insert(day, meals);
    }
    plan
}

fn scrape_health_metrics(document: &Html) -> BTreeMap<String, String> {
    let mut metrics = BTreeMap::new();
    for element in select(document.root_element(), ".progress-bar, .metric-value, .bmi-result") {
        let label = element
            .value()
            .attr("data-label")
            .map(str::to_string)
            .or_else(|| {
                element
                    .prev_siblings()
                    .find_map(ElementRef::wrap)
                    .map(text_of)
                    .filter(|text| !text.is_empty())
            })
            .unwrap_or_else(|| "metric".to_string());
        let text = text_of(element);
        let value = if text.is_empty() {
            element.value().attr("data-value").map(str::to_string)
        } else {
            Some(text)
        };
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            metrics.insert(label, value);
        }
    }
    metrics
}

fn scrape_page_content(document: &Html) -> PageContent {
    let root = document.root_element();
    let title = select(root, "head > title")
        .into_iter()
        .next()
        .map(text_of)
        .unwrap_or_default();
    let headings = select(root, "h1, h2, h3")
        .into_iter()
        .filter(|heading| is_rendered(*heading))
        .map(text_of)
        .collect();
    let visible_text = select(root, "p, li, .card-text, .alert")
        .into_iter()
        .filter(|element| is_rendered(*element))
        .map(text_of)
        .filter(|text| text.chars().count() > MIN_SNIPPET_CHARS)
        .map(|text| truncate_snippet(&text))
        .take(MAX_VISIBLE_SNIPPETS)
        .collect();

    PageContent {
        title,
        headings,
        visible_text,
    }
}
