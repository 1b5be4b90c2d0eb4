//! HTTP front-end: query form, HTML results page, and JSON API.
//!
//! Routes:
//!
//! - `GET /` — query form
//! - `GET /search?q=<query>&page=<n>` — HTML results page (50 per page)
//! - `GET /api/search?q=<query>&limit=<n>&page=<n>` — JSON results
//!
//! Percent- and `+`-decoding of parameters is handled by the query-string
//! extractor before queries reach the searcher.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::search::searcher::{SearchResponse, Searcher};

/// Results per HTML page.
const PAGE_SIZE: usize = 50;

/// Build the application router around a shared searcher.
pub fn create_router(searcher: Arc<Searcher>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/search", get(search_page))
        .route("/api/search", get(api_search))
        .with_state(searcher)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    page: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ApiSearchParams {
    q: Option<String>,
    limit: Option<usize>,
    page: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ApiSearchResponse {
    query: String,
    total: usize,
    time_ms: f64,
    results: Vec<ApiSearchResult>,
}

#[derive(Debug, Serialize)]
struct ApiSearchResult {
    title: String,
    url: String,
}

async fn index_page() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn search_page(
    State(searcher): State<Arc<Searcher>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Redirect::to("/").into_response();
    }

    let page = params.page.unwrap_or(1).max(1);
    let offset = (page - 1) * PAGE_SIZE;

    match searcher.search(&query, PAGE_SIZE, offset) {
        Ok(response) => Html(render_results_page(&query, &response, page)).into_response(),
        Err(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("search failed: {e}")).into_response()
        }
    }
}

async fn api_search(
    State(searcher): State<Arc<Searcher>>,
    Query(params): Query<ApiSearchParams>,
) -> Result<Json<ApiSearchResponse>, (StatusCode, String)> {
    let query = params.q.unwrap_or_default();
    let limit = params.limit.unwrap_or(PAGE_SIZE);
    let page = params.page.unwrap_or(1).max(1);
    let offset = (page - 1) * limit;

    let response = searcher
        .search(&query, limit, offset)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("search failed: {e}")))?;

    Ok(Json(ApiSearchResponse {
        query: response.query,
        total: response.total_count,
        time_ms: response.query_time_ms,
        results: response
            .results
            .into_iter()
            .map(|r| ApiSearchResult {
                title: r.title,
                url: r.url,
            })
            .collect(),
    }))
}

/// Escape a string for embedding in HTML text or attribute values.
fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Search</title>
<style>
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:sans-serif;background:#f5f5f5;min-height:100vh;display:flex;align-items:center;justify-content:center}
.container{text-align:center;padding:20px}
h1{font-size:3rem;margin-bottom:30px}
.search-form{display:flex;max-width:600px;margin:0 auto 30px}
input[type="text"]{flex:1;padding:15px 20px;font-size:18px;border:2px solid #ddd;border-radius:25px 0 0 25px;outline:none}
input[type="text"]:focus{border-color:#4a90d9}
button{padding:15px 30px;font-size:18px;background:#4a90d9;color:white;border:none;border-radius:0 25px 25px 0;cursor:pointer}
button:hover{background:#357abd}
.hints{background:white;padding:25px;border-radius:10px;box-shadow:0 2px 10px rgba(0,0,0,0.1);max-width:600px;margin:0 auto;text-align:left}
.hints h3{margin:15px 0 10px;color:#555}
.hints h3:first-child{margin-top:0}
.hints ul{padding-left:20px}
.hints li{margin:5px 0}
.hints code{background:#f0f0f0;padding:2px 6px;border-radius:3px}
</style>
</head>
<body>
<div class="container">
<h1>Search</h1>
<form action="/search" method="get" class="search-form">
<input type="text" name="q" placeholder="Enter search query..." autofocus>
<button type="submit">Search</button>
</form>
<div class="hints">
<h3>Query syntax:</h3>
<ul>
<li><code>word1 word2</code> - both words (AND)</li>
<li><code>word1 || word2</code> - any word (OR)</li>
<li><code>!word</code> - exclude word (NOT)</li>
<li><code>(word1 || word2) word3</code> - grouping</li>
</ul>
</div>
</div>
</body>
</html>"#;

fn render_results_page(query: &str, response: &SearchResponse, page: usize) -> String {
    let total_pages = response.total_count.div_ceil(PAGE_SIZE).max(1);
    let has_next = page < total_pages;
    let has_prev = page > 1;
    let escaped_query = html_escape(query);

    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{escaped_query} - Search Results</title>
<style>
*{{box-sizing:border-box;margin:0;padding:0}}
body{{font-family:sans-serif;background:#f5f5f5;line-height:1.6}}
.container{{max-width:900px;margin:0 auto;padding:20px}}
header{{display:flex;align-items:center;gap:20px;margin-bottom:20px;padding-bottom:20px;border-bottom:1px solid #ddd}}
header h1{{font-size:1.5rem}}
header h1 a{{color:inherit;text-decoration:none}}
.search-form{{display:flex;flex:1;max-width:500px}}
input[type="text"]{{flex:1;padding:10px 15px;font-size:16px;border:2px solid #ddd;border-radius:20px 0 0 20px;outline:none}}
button{{padding:10px 20px;font-size:16px;background:#4a90d9;color:white;border:none;border-radius:0 20px 20px 0;cursor:pointer}}
.stats{{color:#666;margin-bottom:20px}}
.result{{background:white;padding:20px;margin-bottom:15px;border-radius:8px;box-shadow:0 1px 5px rgba(0,0,0,0.1)}}
.result h3{{margin-bottom:5px}}
.result h3 a{{color:#1a0dab;text-decoration:none}}
.result h3 a:hover{{text-decoration:underline}}
.result cite{{color:#006621;font-style:normal;font-size:14px;word-break:break-all}}
.pagination{{display:flex;justify-content:center;align-items:center;gap:20px;padding:20px 0}}
.pagination a{{color:#4a90d9;text-decoration:none;padding:10px 20px;border:1px solid #4a90d9;border-radius:5px}}
.pagination a:hover{{background:#4a90d9;color:white}}
.no-results{{text-align:center;padding:50px;background:white;border-radius:10px}}
</style>
</head>
<body>
<div class="container">
<header>
<h1><a href="/">Search</a></h1>
<form action="/search" method="get" class="search-form">
<input type="text" name="q" value="{escaped_query}">
<button type="submit">Search</button>
</form>
</header>
<div class="stats">
Found: <strong>{total}</strong> documents
in <strong>{time:.2}</strong> ms
</div>
"#,
        total = response.total_count,
        time = response.query_time_ms,
    );

    if !response.results.is_empty() {
        html.push_str("<div class=\"results\">\n");

        for result in &response.results {
            let _ = write!(
                html,
                "<div class=\"result\">\n<h3><a href=\"{url}\" target=\"_blank\">{title}</a></h3>\n<cite>{url}</cite>\n</div>\n",
                url = html_escape(&result.url),
                title = html_escape(&result.title),
            );
        }

        html.push_str("</div>\n<div class=\"pagination\">\n");

        if has_prev {
            let _ = writeln!(
                html,
                "<a href=\"/search?q={escaped_query}&page={}\">Previous</a>",
                page - 1
            );
        }

        let _ = writeln!(html, "<span>Page {page} of {total_pages}</span>");

        if has_next {
            let _ = writeln!(
                html,
                "<a href=\"/search?q={escaped_query}&page={}\">Next</a>",
                page + 1
            );
        }

        html.push_str("</div>\n");
    } else {
        let _ = write!(
            html,
            "<div class=\"no-results\">\n<p>No results found for <strong>{escaped_query}</strong></p>\n</div>\n"
        );
    }

    html.push_str("</div>\n</body>\n</html>");
    html
}
