use alumni_admin::model::{
    ActiveStatus, AlumniProfile, EventDetails, EventType, NewsArticle, NewsCategory, Record,
};
use alumni_admin::query::dashboard::share_percent;
use alumni_admin::query::options::{graduation_year_options, industry_options, location_options};
use alumni_admin::query::{
    filter_records, AlumniFilter, EventFilter, IndustryBreakdown, NewsFilter, NewsTab,
    QueryContext, RecordFilter, Selection, TimeWindow,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const INDUSTRIES: [&str; 5] = ["Finance", "Technology", "Education", "", "Healthcare"];
const CITIES: [&str; 4] = ["Boston", "boston", "Austin", "Lima"];
const NAMES: [&str; 5] = ["Jane", "Omar", "Li", "Ana", "Tom"];
const DATES: [&str; 5] = ["2023-05-01", "2025-01-01", "2025-01-02", "2030-12-31", ""];

fn maybe<T>(rng: &mut StdRng, v: T) -> Option<T> {
    if rng.gen_bool(0.8) {
        Some(v)
    } else {
        None
    }
}

fn pick<'a>(rng: &mut StdRng, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn alumni(rng: &mut StdRng, n: usize) -> Vec<Record<AlumniProfile>> {
    (0..n)
        .map(|i| {
            let first = pick(rng, &NAMES);
            let industry = pick(rng, &INDUSTRIES);
            let city = pick(rng, &CITIES);
            let year = rng.gen_range(2010..2016);
            let data = AlumniProfile {
                first_name: maybe(rng, first.to_string()),
                last_name: maybe(rng, "Smith".to_string()),
                graduation_year: maybe(rng, year),
                industry: maybe(rng, industry.to_string()),
                location: maybe(rng, city.to_string()),
                current_company: maybe(rng, "Acme".to_string()),
                is_active: match rng.gen_range(0..3) {
                    0 => ActiveStatus::Active,
                    1 => ActiveStatus::Inactive,
                    _ => ActiveStatus::Unspecified,
                },
                ..AlumniProfile::default()
            };
            Record::new(format!("a{}", i), data)
        })
        .collect()
}

fn events(rng: &mut StdRng, n: usize) -> Vec<Record<EventDetails>> {
    (0..n)
        .map(|i| {
            let date = pick(rng, &DATES);
            let kind = *EventType::ALL.choose(rng).unwrap_or(&EventType::Other);
            let required = rng.gen_bool(0.5);
            let data = EventDetails {
                title: Some(format!("event {}", i)),
                event_date: Some(date.to_string()).filter(|d| !d.is_empty()),
                event_type: maybe(rng, kind),
                registration_required: maybe(rng, required),
                ..EventDetails::default()
            };
            Record::new(format!("e{}", i), data)
        })
        .collect()
}

fn news(rng: &mut StdRng, n: usize) -> Vec<Record<NewsArticle>> {
    (0..n)
        .map(|i| {
            let cat = *NewsCategory::ALL.choose(rng).unwrap_or(&NewsCategory::Other);
            let subject = pick(rng, &NAMES);
            let author = pick(rng, &NAMES).to_string();
            let published = rng.gen_bool(0.7);
            let featured = rng.gen_bool(0.3);
            let data = NewsArticle {
                title: Some(format!("story {}", subject)),
                author: maybe(rng, author),
                category: maybe(rng, cat),
                is_published: maybe(rng, published),
                is_featured: maybe(rng, featured),
                ..NewsArticle::default()
            };
            Record::new(format!("n{}", i), data)
        })
        .collect()
}

fn ctx() -> QueryContext {
    QueryContext::new(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
}

fn ids<T>(rows: &[&Record<T>]) -> Vec<String> {
    rows.iter().map(|r| r.id.clone()).collect()
}

/// Filtering the result again changes nothing and order is preserved.
fn check_idempotent<T: Clone, F: RecordFilter<T>>(rows: &[Record<T>], filter: &F) {
    let once = filter_records(rows, filter, &ctx());
    let owned: Vec<Record<T>> = once.iter().map(|r| (*r).clone()).collect();
    let twice = filter_records(&owned, filter, &ctx());
    assert_eq!(ids(&once), ids(&twice));

    let positions: Vec<usize> = once
        .iter()
        .map(|r| rows.iter().position(|x| x.id == r.id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

/// Every row admitted by `narrow` is admitted by `wide`.
fn check_subset<T, F: RecordFilter<T>, G: RecordFilter<T>>(rows: &[Record<T>], wide: &F, narrow: &G) {
    let wide_ids = ids(&filter_records(rows, wide, &ctx()));
    for id in ids(&filter_records(rows, narrow, &ctx())) {
        assert!(wide_ids.contains(&id), "{} escaped the wider filter", id);
    }
}

#[test]
fn empty_alumni_filter_keeps_everything() {
    let mut rng = StdRng::seed_from_u64(7);
    let rows = alumni(&mut rng, 60);
    assert_eq!(filter_records(&rows, &AlumniFilter::default(), &ctx()).len(), rows.len());
}

#[test]
fn alumni_predicates_only_narrow() {
    let mut rng = StdRng::seed_from_u64(11);
    let rows = alumni(&mut rng, 80);
    let years = graduation_year_options(&rows);
    let industries = industry_options(&rows);
    let locations = location_options(&rows);

    let mut filter = AlumniFilter::default();
    let steps: Vec<Box<dyn Fn(&mut AlumniFilter)>> = vec![
        Box::new(|f| f.search = Selection::from_input("an")),
        Box::new(move |f| f.graduation_year = Selection::Only(years[0].clone())),
        Box::new(move |f| f.industry = Selection::Only(industries[0].clone())),
        Box::new(move |f| f.location = Selection::Only(locations[0].clone())),
    ];
    for step in steps {
        let wider = filter.clone();
        step(&mut filter);
        check_subset(&rows, &wider, &filter);
        check_idempotent(&rows, &filter);
    }
}

#[test]
fn event_windows_partition_dated_events() {
    let mut rng = StdRng::seed_from_u64(3);
    let rows = events(&mut rng, 60);
    let count = |window| {
        let f = EventFilter {
            window,
            ..EventFilter::default()
        };
        filter_records(&rows, &f, &ctx()).len()
    };
    let dated = rows.iter().filter(|r| r.data.event_date.is_some()).count();
    assert_eq!(count(TimeWindow::Upcoming) + count(TimeWindow::Past), dated);
    assert_eq!(count(TimeWindow::All), rows.len());

    let wide = EventFilter::default();
    let narrow = EventFilter {
        event_type: Selection::Only(EventType::Networking),
        registration_required: Selection::Only(true),
        ..EventFilter::default()
    };
    check_subset(&rows, &wide, &narrow);
    check_idempotent(&rows, &narrow);
}

#[test]
fn news_tabs_and_flags_only_narrow() {
    let mut rng = StdRng::seed_from_u64(5);
    let rows = news(&mut rng, 60);
    let all = NewsFilter::default();
    assert_eq!(filter_records(&rows, &all, &ctx()).len(), rows.len());

    let featured = NewsFilter {
        tab: NewsTab::Featured,
        ..NewsFilter::default()
    };
    let featured_unpublished = NewsFilter {
        published: Selection::Only(false),
        ..featured.clone()
    };
    check_subset(&rows, &all, &featured);
    check_subset(&rows, &featured, &featured_unpublished);
    check_idempotent(&rows, &featured_unpublished);

    let searched = NewsFilter {
        search: Selection::from_input("JANE"),
        ..NewsFilter::default()
    };
    check_subset(&rows, &all, &searched);
}

#[test]
fn options_are_distinct_and_drawn_from_the_data() {
    let mut rng = StdRng::seed_from_u64(13);
    let rows = alumni(&mut rng, 50);

    let years = graduation_year_options(&rows);
    let mut sorted = years.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    sorted.dedup();
    assert_eq!(years, sorted);

    for loc in location_options(&rows) {
        assert!(rows.iter().any(|r| r.data.location.as_deref() == Some(loc.as_str())));
    }
    let industries = industry_options(&rows);
    assert!(!industries.iter().any(|i| i.trim().is_empty()));
    assert!(industries.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn industry_shares_are_bounded_and_ordered() {
    let mut rng = StdRng::seed_from_u64(17);
    let rows = alumni(&mut rng, 90);
    let b = IndustryBreakdown::compute(&rows, 6);
    assert!(b.shares.len() <= 6);
    assert!(b.shares.windows(2).all(|w| w[0].count >= w[1].count));
    let kept: usize = b.shares.iter().map(|s| s.count).sum();
    assert_eq!(b.total_categorized, kept);
    for s in &b.shares {
        assert!(s.percent <= 100);
        assert_eq!(s.percent, share_percent(s.count, b.total_categorized));
    }
    let total: u32 = b.shares.iter().map(|s| s.percent).sum();
    assert!(total <= 100 + b.shares.len() as u32);

    assert_eq!(share_percent(3, 0), 0);
    assert_eq!(share_percent(1, 3), 33);
    assert_eq!(share_percent(2, 3), 67);
}
