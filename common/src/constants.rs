pub const BASE_URL: &str = "https://www.macys.com";
pub const BRAND_DIRECTORY_URL: &str =
    "https://www.macys.com/shop/all-brands?id=63538&cm_sp=us_hdr-_-brands-_-63538_brands";
pub const OUTPUT_FILE: &str = "macys_items_and_prices.csv";

// a brand with more pages than this is treated as a pagination loop
pub const MAX_PAGES_PER_BRAND: u64 = 500;
pub const CRAWL_COOLDOWN_SECS: u64 = 0;
