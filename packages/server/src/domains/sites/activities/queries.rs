use anyhow::Result;

use crate::common::SiteId;
use crate::domains::sites::data::SiteData;
use crate::domains::sites::models::Site;
use crate::kernel::ServerDeps;

pub async fn list_sites(deps: &ServerDeps) -> Result<Vec<SiteData>> {
    let rows = Site::list_with_responsible(&deps.db_pool).await?;
    Ok(rows
        .into_iter()
        .map(|row| SiteData::from_row(row, &deps.codec))
        .collect())
}

pub async fn get_site(id: SiteId, deps: &ServerDeps) -> Result<Option<SiteData>> {
    let row = Site::find_with_responsible(id, &deps.db_pool).await?;
    Ok(row.map(|row| SiteData::from_row(row, &deps.codec)))
}
