/// Page size for the paginated product listing
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum length of a product name
pub const MAX_NAME_LENGTH: u64 = 255;

// =============================================================================
// WEB
// =============================================================================

/// Path unauthenticated web requests are redirected to
pub const LOGIN_PATH: &str = "/login";

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "catalog_session";

/// Cookie carrying one-shot flash data across a redirect
pub const FLASH_COOKIE: &str = "catalog_flash";

/// Empty-state message on the product listing
pub const EMPTY_PRODUCTS_MESSAGE: &str = "No products found";

/// Empty-state message on the category listing
pub const EMPTY_CATEGORIES_MESSAGE: &str = "No categories found";

// =============================================================================
// CURRENCY
// =============================================================================

/// Currency products are priced in
pub const BASE_CURRENCY: &str = "USD";

/// Currency of the derived `price_eur` attribute
pub const SECONDARY_CURRENCY: &str = "EUR";

/// Largest price the `NUMERIC(12, 2)` column holds: 9999999999.99
pub const MAX_PRICE: rust_decimal::Decimal =
    rust_decimal::Decimal::from_parts(3_567_587_327, 232, 0, false, 2);
