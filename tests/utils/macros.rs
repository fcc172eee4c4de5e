/// Compares status, message and data against one of the well-known errors.
#[allow(unused_macros)]
macro_rules! assert_error {
    ($res:expr, $error:expr) => {{
        let error: ::cricket_backend::error::Error = $error;
        let res = $res;
        assert_eq!(res.status(), error.status());

        let res_json: ::serde_json::Value = res.json().await;
        assert_eq!(res_json["code"], error.status().as_str());
        assert_eq!(res_json["message"], error.message());
        assert_eq!(
            res_json["data"],
            error.data().cloned().unwrap_or_else(|| ::serde_json::json!({}))
        );
    }};
}

#[allow(unused_imports)]
pub(crate) use assert_error;

/// A 400 whose `data` is exactly the given field map.
#[allow(unused_macros)]
macro_rules! assert_validation {
    ($res:expr, {$($json:tt)+} $(,)?) => {{
        let res = $res;
        assert_eq!(res.status(), ::http::StatusCode::BAD_REQUEST);

        let res_json: ::serde_json::Value = res.json().await;
        assert_eq!(res_json["code"], "400");
        assert_eq!(res_json["message"], "Validation failed");
        ::assert_json_diff::assert_json_eq!(res_json["data"], ::serde_json::json!({$($json)+}));
    }};
}

#[allow(unused_imports)]
pub(crate) use assert_validation;

#[allow(unused_macros)]
macro_rules! enable_logging {
    ($level:ident) => {{
        use ::tracing::level_filters::LevelFilter;
        use ::tracing_subscriber::{
            layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
        };

        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::$level.into())
            .from_env_lossy();

        ::tracing_subscriber::registry()
            .with(
                ::tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .init();
    }};
}

#[allow(unused_imports)]
pub(crate) use enable_logging;
