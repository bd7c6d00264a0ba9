use super::selection::{contains_ci, Flag, Selection};
use super::{QueryContext, RecordFilter};
use crate::model::{NewsArticle, NewsCategory};

/// Mutually exclusive article listing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsTab {
    #[default]
    All,
    Published,
    Featured,
}

impl NewsTab {
    pub fn label(self) -> &'static str {
        match self {
            NewsTab::All => "all",
            NewsTab::Published => "published",
            NewsTab::Featured => "featured",
        }
    }

    pub fn next(self) -> Self {
        match self {
            NewsTab::All => NewsTab::Published,
            NewsTab::Published => NewsTab::Featured,
            NewsTab::Featured => NewsTab::All,
        }
    }

    fn admits(self, a: &NewsArticle) -> bool {
        match self {
            NewsTab::All => true,
            NewsTab::Published => a.is_published == Some(true),
            NewsTab::Featured => a.is_featured == Some(true),
        }
    }
}

/// News list predicates.
///
/// `tab` and `published` are applied together even when they contradict
/// each other (`Published` tab with `published = no` yields nothing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFilter {
    pub search: Selection<String>,
    pub tab: NewsTab,
    pub category: Selection<NewsCategory>,
    pub published: Flag,
}

impl NewsFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_any()
            && self.tab == NewsTab::All
            && self.category.is_any()
            && self.published.is_any()
    }
}

fn field_contains(field: &Option<String>, term: &str) -> bool {
    field.as_deref().is_some_and(|v| contains_ci(v, term))
}

impl RecordFilter<NewsArticle> for NewsFilter {
    fn matches(&self, a: &NewsArticle, _ctx: &QueryContext) -> bool {
        self.search.admits(|term| {
            field_contains(&a.title, term)
                || field_contains(&a.summary, term)
                || field_contains(&a.author, term)
        }) && self.tab.admits(a)
            && self.category.admits(|c| a.category == Some(*c))
            && self
                .published
                .admits(|want| a.is_published == Some(*want))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::query::filter_records;
    use chrono::NaiveDate;

    fn ctx() -> QueryContext {
        QueryContext::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    fn article(id: &str, title: &str, author: &str) -> Record<NewsArticle> {
        Record::new(
            id,
            NewsArticle {
                title: Some(title.to_string()),
                author: Some(author.to_string()),
                ..NewsArticle::default()
            },
        )
    }

    #[test]
    fn search_matches_author_alone() {
        let rows = vec![
            article("hit", "Homecoming recap", "Jane Doe"),
            article("miss", "Research grant", "John Smith"),
        ];
        let filter = NewsFilter {
            search: Selection::Only("jane".into()),
            ..NewsFilter::default()
        };
        let got: Vec<_> = filter_records(&rows, &filter, &ctx())
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(got, vec!["hit"]);
    }

    #[test]
    fn tab_and_published_predicate_compound() {
        let mut live = article("live", "a", "x");
        live.data.is_published = Some(true);
        live.data.is_featured = Some(true);
        let mut draft = article("draft", "b", "x");
        draft.data.is_published = Some(false);
        draft.data.is_featured = Some(true);
        let rows = vec![live, draft];

        let filter = NewsFilter {
            tab: NewsTab::Featured,
            published: Selection::Only(false),
            ..NewsFilter::default()
        };
        let got: Vec<_> = filter_records(&rows, &filter, &ctx())
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(got, vec!["draft"]);

        let filter = NewsFilter {
            tab: NewsTab::Published,
            published: Selection::Only(false),
            ..NewsFilter::default()
        };
        assert!(filter_records(&rows, &filter, &ctx()).is_empty());
    }

    #[test]
    fn category_filter_is_exact() {
        let mut a = article("a", "t", "x");
        a.data.category = Some(NewsCategory::Research);
        let b = article("b", "t", "x");
        let rows = vec![a, b];
        let filter = NewsFilter {
            category: Selection::Only(NewsCategory::Research),
            ..NewsFilter::default()
        };
        assert_eq!(filter_records(&rows, &filter, &ctx()).len(), 1);
    }
}
