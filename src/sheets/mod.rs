// Google Sheets access: service-account credentials, the REST client,
// and the header-row → record conversion that mirrors `get_all_records`.

pub mod client;
pub mod credentials;
pub mod records;
pub mod traits;
