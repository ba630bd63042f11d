mod account;
mod friends;
mod interests;
mod output;
mod search;
mod users;
mod variants;

pub use account::{cmd_edit_profile, cmd_passwd, cmd_register, cmd_show_user};
pub use friends::cmd_friends;
pub use interests::cmd_list_interests;
pub use search::cmd_search;
pub use users::cmd_generate_users;
pub use variants::cmd_variants_sync;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;

pub(crate) async fn open_store(config: &Config) -> anyhow::Result<Store> {
    Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await
}

pub(crate) fn shared(config: &Config) -> Arc<RwLock<Config>> {
    Arc::new(RwLock::new(config.clone()))
}
