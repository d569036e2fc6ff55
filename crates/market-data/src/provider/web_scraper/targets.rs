//! Marketplaces the web scraper knows how to read.

use rust_decimal::Decimal;

use crate::reconciler::extract::keys;

/// Fixed CNY per USD rate applied to Buff163 prices at ingestion.
///
/// An approximation, not a live rate.
pub const CNY_PER_USD: Decimal = Decimal::from_parts(71, 0, 0, false, 1);

/// A marketplace search page and the in-page extraction that reads it.
#[derive(Clone, Copy, Debug)]
pub struct ScrapeTarget {
    pub id: &'static str,
    pub name: &'static str,
    pub marketplace: &'static str,
    /// Search page URL, the encoded search term is appended.
    pub search_url: &'static str,
    pub currency: &'static str,
    /// Divisor taking native prices to USD, `None` when already USD.
    pub units_per_usd: Option<Decimal>,
    /// Numeric price fields the page function emits.
    pub price_keys: &'static [&'static str],
    pub page_function: &'static str,
    pub priority: u8,
}

impl ScrapeTarget {
    pub fn start_url(&self, term: &str) -> String {
        format!("{}{}", self.search_url, urlencoding::encode(term))
    }
}

pub const BUFF163: ScrapeTarget = ScrapeTarget {
    id: "BUFF163",
    name: "Buff163",
    marketplace: "Buff163",
    search_url: "https://buff.163.com/goods/market/search?game=csgo&search=",
    currency: "CNY",
    units_per_usd: Some(CNY_PER_USD),
    price_keys: &["priceCNY", "price"],
    page_function: BUFF163_PAGE_FUNCTION,
    priority: 3,
};

pub const STEAMDT: ScrapeTarget = ScrapeTarget {
    id: "STEAMDT",
    name: "SteamDT",
    marketplace: "SteamDT",
    search_url: "https://steamdt.com/en/mkt?keyword=",
    currency: crate::models::USD,
    units_per_usd: None,
    price_keys: keys::PRICE,
    page_function: STEAMDT_PAGE_FUNCTION,
    priority: 4,
};

const BUFF163_PAGE_FUNCTION: &str = r#"async function pageFunction(context) {
    const { page } = context;
    await page.waitForTimeout(3000);
    return page.evaluate(() => {
        const rows = document.querySelectorAll('[data-good-id], .market-list-item');
        const out = [];
        for (const row of rows) {
            const name = row.querySelector('a[href*="/goods/"], .name');
            const price = row.querySelector('.price, .sell_price, [data-price]');
            if (!name || !price) continue;
            const priceText = price.textContent.trim();
            const match = priceText.match(/\d[\d,]*(\.\d+)?/);
            if (!match) continue;
            out.push({
                name: name.textContent.trim(),
                priceCNY: parseFloat(match[0].replace(/,/g, '')),
                priceText,
            });
        }
        return out;
    });
}"#;

const STEAMDT_PAGE_FUNCTION: &str = r#"async function pageFunction(context) {
    const { page } = context;
    await page.waitForTimeout(3000);
    return page.evaluate(() => {
        const selectors = ['.price', '[class*="price"]', '[data-price]', '.el-table__body td'];
        for (const selector of selectors) {
            const out = [];
            for (const cell of document.querySelectorAll(selector)) {
                const priceText = cell.textContent.trim();
                const match = priceText.match(/\$?(\d[\d,]*(\.\d+)?)/);
                if (!match) continue;
                const row = cell.closest('tr') || cell.parentElement;
                const name = row && row.querySelector('a, .name, td:first-child');
                out.push({
                    name: name ? name.textContent.trim() : '',
                    price: parseFloat(match[1].replace(/,/g, '')),
                    priceText,
                });
            }
            if (out.length) return out;
        }
        return [];
    });
}"#;
