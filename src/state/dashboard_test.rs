use super::*;

#[test]
fn trend_points_are_sorted_by_date() {
    let mut trends = BTreeMap::new();
    trends.insert("2024-03-02".to_owned(), 3);
    trends.insert("2024-02-28".to_owned(), 1);
    trends.insert("2024-03-01".to_owned(), 0);

    let points = trend_points(&trends);
    let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-02-28", "2024-03-01", "2024-03-02"]);
    assert_eq!(points[2].enrollments, 3);
}

#[test]
fn empty_trends_produce_no_points() {
    let points = trend_points(&BTreeMap::new());
    assert!(points.is_empty());
    assert_eq!(peak_enrollments(&points), 0);
}

#[test]
fn peak_is_the_largest_count() {
    let points = vec![
        TrendPoint { date: "a".to_owned(), enrollments: 2 },
        TrendPoint { date: "b".to_owned(), enrollments: 9 },
    ];
    assert_eq!(peak_enrollments(&points), 9);
}

#[test]
fn course_page_fallbacks_are_distinct() {
    assert_eq!(COURSE_DETAILS_FAILED, "Error fetching course details");
    assert_eq!(INSTRUCTOR_COURSE_FAILED, "Failed to fetch course details");
    assert_eq!(COURSE_DATA_FAILED, "Failed to fetch course data");
}
