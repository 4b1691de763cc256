use super::*;

fn options(api_url: &str) -> ClientOptions {
    ClientOptions {
        api_url: api_url.to_owned(),
        pdf_base_url: "https://files.example.com/attach".to_owned(),
        warmup_url: None,
        timeout_secs: 5,
        user_agent: "annwatch-test/0.1".to_owned(),
        request_delay_ms: 0,
        max_retries: 0,
        backoff_base_secs: 0,
        max_pages: 3,
    }
}

#[test]
fn page_url_carries_exchange_query() {
    let client = AnnouncementClient::new(options("https://api.example.com/BseIndiaAPI/api/AnnGetData/w"))
        .expect("client should build");
    let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let url = client.page_url(day, 2);

    assert_eq!(url.path(), "/BseIndiaAPI/api/AnnGetData/w");
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("pageno".to_owned(), "2".to_owned())));
    assert!(pairs.contains(&("strPrevDate".to_owned(), "20240115".to_owned())));
    assert!(pairs.contains(&("strToDate".to_owned(), "20240115".to_owned())));
    assert!(pairs.contains(&("strCat".to_owned(), "-1".to_owned())));
    assert!(pairs.contains(&("strType".to_owned(), "C".to_owned())));
}

#[test]
fn invalid_api_url_is_rejected() {
    let result = AnnouncementClient::new(options("not a url"));
    assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
}

#[test]
fn zero_max_pages_is_clamped_to_one() {
    let mut opts = options("https://api.example.com/ann");
    opts.max_pages = 0;
    let client = AnnouncementClient::new(opts).expect("client should build");
    assert_eq!(client.max_pages, 1);
}
