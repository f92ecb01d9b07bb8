use actix_web::{http::Method, HttpRequest, HttpResponse};

use crate::utils::AppError;

const INDEX_HTML: &str = include_str!("../../public/index.html");
const LOGIN_HTML: &str = include_str!("../../public/login.html");
const DASHBOARD_HTML: &str = include_str!("../../public/dashboard.html");
const SCRIPT_JS: &str = include_str!("../../public/script.js");
const STYLE_CSS: &str = include_str!("../../public/style.css");

const HTML: &str = "text/html; charset=utf-8";

fn asset(path: &str) -> Option<(&'static str, &'static str)> {
    match path {
        "/" | "/index.html" => Some((HTML, INDEX_HTML)),
        "/login.html" => Some((HTML, LOGIN_HTML)),
        "/dashboard.html" => Some((HTML, DASHBOARD_HTML)),
        "/script.js" => Some(("application/javascript; charset=utf-8", SCRIPT_JS)),
        "/style.css" => Some(("text/css; charset=utf-8", STYLE_CSS)),
        _ => None,
    }
}

/// Serves the bundled client. Any GET/HEAD path without a bundled asset
/// gets the index page, including missing files such as `/favicon.ico`
/// and unmatched paths under `/api`. Other methods are 404.
pub async fn serve(req: HttpRequest) -> Result<HttpResponse, AppError> {
    if *req.method() != Method::GET && *req.method() != Method::HEAD {
        return Err(AppError::NotFound("Not found"));
    }

    let (content_type, body) = asset(req.path()).unwrap_or((HTML, INDEX_HTML));
    Ok(HttpResponse::Ok().content_type(content_type).body(body))
}
