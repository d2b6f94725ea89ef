use std::{
    env,
    sync::{
        LazyLock,
        atomic::{AtomicBool, Ordering},
    },
};

use strum_macros::EnumIter;
use tracing::{info, warn};

static CONNECTION_URI: LazyLock<String> = LazyLock::new(|| {
    let host = env::var("PROMETHEUS_HOST").unwrap_or("localhost".into());
    let port = env::var("PROMETHEUS_PORT").unwrap_or("9090".into());

    format!("http://{host}:{port}/api/v1/otlp/v1/metrics")
});

const SERVICE_NAME: &str = "catalog-indexer";
const EXPORT_INTERVAL_SECS: u64 = 5;

// exporting is opt-in, nothing is pushed until `enable` is called
static ENABLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, EnumIter, Hash, Eq, PartialEq)]
pub enum Metrics {
    /// Counter for brands whose pages were walked
    CrawledBrand,
    /// Counter for listing pages fetched and parsed
    CrawledPage,
    /// Counter for products written to the output
    CrawledProduct,
    /// Counter for pages lost to a transport timeout
    PageTimeout,
}

impl Metrics {
    fn name(&self) -> &'static str {
        match self {
            Metrics::CrawledBrand => "CRAWLED_BRAND",
            Metrics::CrawledPage => "CRAWLED_PAGE",
            Metrics::CrawledProduct => "CRAWLED_PRODUCT",
            Metrics::PageTimeout => "PAGE_TIMEOUT",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Metrics::CrawledBrand => "Brands whose listing was walked",
            Metrics::CrawledPage => "Listing pages fetched and parsed",
            Metrics::CrawledProduct => "Product lines written to the output",
            Metrics::PageTimeout => "Listing pages lost to a transport timeout",
        }
    }
}

pub fn enable() {
    info!("Exporting metrics to {}", *CONNECTION_URI);
    ENABLED.store(true, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Flushes whatever the periodic reader has not pushed yet
pub fn shutdown() {
    if !is_enabled() {
        return;
    }

    let Some(provider) = _private::PROVIDER.as_ref() else {
        return;
    };

    if let Err(err) = provider.shutdown() {
        warn!("Failed to flush metrics: {err}");
    }
}

pub mod _private {
    pub use opentelemetry::KeyValue;

    use std::{collections::HashMap, sync::LazyLock, time::Duration};

    use opentelemetry::metrics::{Counter, MeterProvider};
    use opentelemetry_otlp::{MetricExporter, Protocol, WithExportConfig};
    use opentelemetry_sdk::{
        Resource,
        metrics::{PeriodicReader, SdkMeterProvider},
    };
    use strum::IntoEnumIterator;
    use tracing::error;

    use crate::{CONNECTION_URI, EXPORT_INTERVAL_SECS, Metrics, SERVICE_NAME};

    /// `None` when the exporter could not be built, counting is then a no-op
    pub static PROVIDER: LazyLock<Option<SdkMeterProvider>> = LazyLock::new(|| {
        let exporter = match MetricExporter::builder()
            .with_http()
            .with_protocol(Protocol::HttpBinary)
            .with_endpoint(CONNECTION_URI.as_str())
            .build()
        {
            Ok(exporter) => exporter,
            Err(err) => {
                error!("Failed to build metrics exporter for {}: {err}", *CONNECTION_URI);
                return None;
            }
        };

        let reader = PeriodicReader::builder(exporter)
            .with_interval(Duration::from_secs(EXPORT_INTERVAL_SECS))
            .build();

        Some(
            SdkMeterProvider::builder()
                .with_reader(reader)
                .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
                .build(),
        )
    });

    pub static COUNTERS: LazyLock<HashMap<Metrics, Counter<u64>>> = LazyLock::new(|| {
        let Some(provider) = PROVIDER.as_ref() else {
            return HashMap::new();
        };

        let meter = provider.meter(SERVICE_NAME);

        Metrics::iter()
            .map(|metric| {
                let counter = meter
                    .u64_counter(metric.name())
                    .with_description(metric.description())
                    .build();

                (metric, counter)
            })
            .collect()
    });
}

#[macro_export]
macro_rules! put_metric {
    ($metric_name:expr, $added_value:expr $(, $key:literal => $value:expr)* $(,)?) => {
        if $crate::is_enabled() {
            use $crate::_private::{KeyValue, COUNTERS};
            use $crate::Metrics;

            let metric_name: Metrics = $metric_name;
            let added_value: u64 = $added_value;

            let attributes: &[KeyValue] = &[
                $(KeyValue::new($key, $value),)*
            ];

            if let Some(counter) = COUNTERS.get(&metric_name) {
                counter.add(added_value, attributes);
            }
        }
    };
}
