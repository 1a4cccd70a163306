use crate::helpers::{breakdown_section, seeded_store, spawn_app, EARLIER, LATER};
use axum::http::StatusCode;
use std::sync::Arc;
use viewer::{ReadError, RowFilter, SqliteWeatherReader, Table, WeatherReader};

fn filter(location: Option<&str>, period: Option<&str>) -> RowFilter {
    RowFilter {
        location: location.map(str::to_string),
        period: period.map(str::to_string),
        date: None,
    }
}

#[tokio::test]
async fn reads_weather_rows_in_id_order() {
    let (_dir, path) = seeded_store().await;
    let reader = SqliteWeatherReader::new(path.to_str().unwrap());

    let rows = reader.weather(&RowFilter::default()).await.unwrap();
    let locations: Vec<Option<&str>> = rows.iter().map(|r| r.location.as_deref()).collect();
    assert_eq!(
        locations,
        vec![Some("Taipei"), Some("Tainan"), Some("Banqiao"), None, Some("Taipei")]
    );
    assert!(rows.windows(2).all(|pair| pair[0].id < pair[1].id));
    assert_eq!(rows[0].min_temp, Some(15.0));
    assert_eq!(rows[1].min_temp, None);
    assert!(rows[0].inserted_at.is_some());

    let taipei = reader.weather(&filter(Some("Taipei"), None)).await.unwrap();
    assert_eq!(taipei.len(), 2);
    assert_eq!(taipei[0].description.as_deref(), Some("Cloudy"));
    assert_eq!(taipei[1].date.as_deref(), Some(LATER));

    let banqiao = reader.weather(&filter(Some("Banqiao"), None)).await.unwrap();
    assert_eq!(banqiao.len(), 1);
    assert_eq!(banqiao[0].date.as_deref(), Some(EARLIER));
    assert_eq!(banqiao[0].description, None);
}

#[tokio::test]
async fn distinct_locations_skip_nulls() {
    let (_dir, path) = seeded_store().await;
    let reader = SqliteWeatherReader::new(path.to_str().unwrap());

    assert_eq!(
        reader.locations(Table::Weather).await.unwrap(),
        vec!["Banqiao", "Tainan", "Taipei"]
    );
    assert_eq!(
        reader.locations(Table::Precipitation).await.unwrap(),
        vec!["Banqiao", "Taipei"]
    );
}

#[tokio::test]
async fn precipitation_filters_and_period_order() {
    let (_dir, path) = seeded_store().await;
    let reader = SqliteWeatherReader::new(path.to_str().unwrap());

    assert_eq!(
        reader.periods().await.unwrap(),
        vec!["Now", "Past1hr", "Past24hr", "Custom"]
    );

    let past_hour = reader
        .precipitation(&filter(None, Some("Past1hr")))
        .await
        .unwrap();
    let values: Vec<(Option<&str>, Option<f64>)> = past_hour
        .iter()
        .map(|r| (r.location.as_deref(), r.precipitation))
        .collect();
    assert_eq!(
        values,
        vec![
            (Some("Taipei"), Some(2.0)),
            (Some("Banqiao"), None),
            (Some("Taipei"), Some(3.0)),
        ]
    );

    let banqiao_now = reader
        .precipitation(&filter(Some("Banqiao"), Some("Now")))
        .await
        .unwrap();
    assert_eq!(banqiao_now.len(), 1);
    assert_eq!(banqiao_now[0].precipitation, Some(0.0));
}

#[tokio::test]
async fn observation_times_newest_first() {
    let (_dir, path) = seeded_store().await;
    let reader = SqliteWeatherReader::new(path.to_str().unwrap());

    assert_eq!(
        reader.dates(&RowFilter::default()).await.unwrap(),
        vec![LATER, EARLIER]
    );
    assert_eq!(
        reader.dates(&filter(Some("Banqiao"), None)).await.unwrap(),
        vec![EARLIER]
    );

    let taipei_earlier = RowFilter {
        date: Some(EARLIER.to_string()),
        ..filter(Some("Taipei"), None)
    };
    let rows = reader.precipitation(&taipei_earlier).await.unwrap();
    let periods: Vec<Option<&str>> = rows.iter().map(|r| r.period.as_deref()).collect();
    assert_eq!(periods, vec![Some("Past24hr"), Some("Past1hr")]);

    let latest = RowFilter {
        date: Some("latest".to_string()),
        ..filter(Some("Taipei"), None)
    };
    assert_eq!(reader.precipitation(&latest).await.unwrap().len(), 4);
}

#[tokio::test]
async fn missing_store_file_is_reported_and_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");
    let reader = SqliteWeatherReader::new(path.to_str().unwrap());

    let err = reader.weather(&RowFilter::default()).await.unwrap_err();
    assert!(matches!(err, ReadError::StoreMissing(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn store_without_tables_reports_missing_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.db");
    std::fs::File::create(&path).unwrap();
    let reader = SqliteWeatherReader::new(path.to_str().unwrap());

    let err = reader.periods().await.unwrap_err();
    assert!(matches!(err, ReadError::MissingTable(Table::Precipitation)));
}

#[tokio::test]
async fn pages_render_from_a_fetched_store() {
    let (_dir, path) = seeded_store().await;
    let reader = SqliteWeatherReader::new(path.to_str().unwrap());
    let test_app = spawn_app(Arc::new(reader));

    let (status, html) = test_app.get_html("/?location=Tainan").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Rows: 1"));
    assert!(html.contains("Sunny"));
    assert!(!html.contains("Cloudy"));

    let (status, html) = test_app.get_html("/precipitation?period=Custom").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Rows: 1"));
    assert!(html.contains("Banqiao"));

    let (status, html) = test_app.get_html("/precipitation?location=Taipei").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Rows: 4"));
    assert!(html.contains(&format!("Precipitation for Taipei at {}", LATER)));
    let breakdown = breakdown_section(&html);
    assert!(breakdown.contains(r#"<td>Now</td><td class="has-text-right">0.5</td>"#));
    assert!(breakdown.contains(r#"<td>Past1hr</td><td class="has-text-right">3</td>"#));
    assert!(breakdown.contains(
        r#"<td>Past24hr</td><td class="has-text-right"><span class="has-text-grey">-</span></td>"#
    ));

    let (status, html) = test_app
        .get_html(&format!("/precipitation?location=Taipei&date={}", EARLIER))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(&format!("Precipitation for Taipei at {}", EARLIER)));
    let breakdown = breakdown_section(&html);
    assert!(breakdown.contains(r#"<td>Past24hr</td><td class="has-text-right">10.5</td>"#));
    assert!(breakdown.contains(
        r#"<td>Now</td><td class="has-text-right"><span class="has-text-grey">-</span></td>"#
    ));
}
