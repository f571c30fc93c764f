use anyhow::{Context, Result};
use rusqlite::Connection;
use sea_query::{ColumnDef, Expr, OnConflict, Order, Query, SqliteQueryBuilder, Table};
use sea_query_rusqlite::RusqliteBinder;
use std::path::{Path, PathBuf};

use crate::data::{
    CacheMeta, IssueTabId, IssueTabPrefsTable, RecentProject, RecentProjectsTable, CACHE_VERSION,
};

pub fn get_cache_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("grainview").join("cache.db"))
}

pub fn init_db(conn: &Connection) -> Result<()> {
    // Create version table
    let cache_meta_sql = Table::create()
        .table(CacheMeta::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(CacheMeta::Key)
                .text()
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(CacheMeta::Value).integer())
        .build(SqliteQueryBuilder);
    conn.execute(&cache_meta_sql, [])?;

    // Check version
    let (version_sql, version_values) = Query::select()
        .column(CacheMeta::Value)
        .from(CacheMeta::Table)
        .and_where(Expr::col(CacheMeta::Key).eq("version"))
        .build_rusqlite(SqliteQueryBuilder);

    let current_version: Option<i32> = conn
        .query_row(&version_sql, &*version_values.as_params(), |row| row.get(0))
        .ok();

    if current_version != Some(CACHE_VERSION) {
        for drop_sql in [
            Table::drop()
                .table(RecentProjectsTable::Table)
                .if_exists()
                .build(SqliteQueryBuilder),
            Table::drop()
                .table(IssueTabPrefsTable::Table)
                .if_exists()
                .build(SqliteQueryBuilder),
        ] {
            conn.execute(&drop_sql, [])?;
        }

        let (upsert_sql, upsert_values) = Query::insert()
            .into_table(CacheMeta::Table)
            .columns([CacheMeta::Key, CacheMeta::Value])
            .values_panic(["version".into(), CACHE_VERSION.into()])
            .on_conflict(
                OnConflict::column(CacheMeta::Key)
                    .update_column(CacheMeta::Value)
                    .to_owned(),
            )
            .build_rusqlite(SqliteQueryBuilder);
        conn.execute(&upsert_sql, &*upsert_values.as_params())?;
    }

    let recent_sql = Table::create()
        .table(RecentProjectsTable::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(RecentProjectsTable::ProjectId)
                .text()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(RecentProjectsTable::FullName)
                .text()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(RecentProjectsTable::ViewedAt)
                .text()
                .not_null(),
        )
        .build(SqliteQueryBuilder);
    conn.execute(&recent_sql, [])?;

    let prefs_sql = Table::create()
        .table(IssueTabPrefsTable::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(IssueTabPrefsTable::ProjectId)
                .text()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(IssueTabPrefsTable::TabId)
                .text()
                .not_null(),
        )
        .build(SqliteQueryBuilder);
    conn.execute(&prefs_sql, [])?;

    Ok(())
}

/// Recently viewed projects and per-project issue tab preferences.
pub struct Cache {
    conn: Connection,
}

impl Cache {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open cache at {}", path.display()))?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_default() -> Result<Self> {
        let path = get_cache_path().ok_or_else(|| anyhow::anyhow!("No cache dir"))?;
        Self::open(&path)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn remember_project(&self, project_id: &str, full_name: &str) -> Result<()> {
        let viewed_at = chrono::Utc::now().to_rfc3339();
        self.remember_project_at(project_id, full_name, &viewed_at)
    }

    pub fn remember_project_at(
        &self,
        project_id: &str,
        full_name: &str,
        viewed_at: &str,
    ) -> Result<()> {
        let (sql, values) = Query::insert()
            .into_table(RecentProjectsTable::Table)
            .columns([
                RecentProjectsTable::ProjectId,
                RecentProjectsTable::FullName,
                RecentProjectsTable::ViewedAt,
            ])
            .values_panic([project_id.into(), full_name.into(), viewed_at.into()])
            .on_conflict(
                OnConflict::column(RecentProjectsTable::ProjectId)
                    .update_columns([RecentProjectsTable::FullName, RecentProjectsTable::ViewedAt])
                    .to_owned(),
            )
            .build_rusqlite(SqliteQueryBuilder);

        self.conn.execute(&sql, &*values.as_params())?;
        Ok(())
    }

    /// Most recently viewed first.
    pub fn recent_projects(&self, limit: u64) -> Result<Vec<RecentProject>> {
        let (sql, values) = Query::select()
            .columns([
                RecentProjectsTable::ProjectId,
                RecentProjectsTable::FullName,
                RecentProjectsTable::ViewedAt,
            ])
            .from(RecentProjectsTable::Table)
            .order_by(RecentProjectsTable::ViewedAt, Order::Desc)
            .limit(limit)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = self.conn.prepare(&sql)?;
        let projects = stmt
            .query_map(&*values.as_params(), |row| {
                Ok(RecentProject {
                    project_id: row.get(0)?,
                    full_name: row.get(1)?,
                    viewed_at: row.get(2)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(projects)
    }

    pub fn save_active_tab(&self, project_id: &str, tab: &IssueTabId) -> Result<()> {
        let (sql, values) = Query::insert()
            .into_table(IssueTabPrefsTable::Table)
            .columns([IssueTabPrefsTable::ProjectId, IssueTabPrefsTable::TabId])
            .values_panic([project_id.into(), tab.as_str().into()])
            .on_conflict(
                OnConflict::column(IssueTabPrefsTable::ProjectId)
                    .update_column(IssueTabPrefsTable::TabId)
                    .to_owned(),
            )
            .build_rusqlite(SqliteQueryBuilder);

        self.conn.execute(&sql, &*values.as_params())?;
        Ok(())
    }

    pub fn load_active_tab(&self, project_id: &str) -> Result<Option<IssueTabId>> {
        let (sql, values) = Query::select()
            .column(IssueTabPrefsTable::TabId)
            .from(IssueTabPrefsTable::Table)
            .and_where(Expr::col(IssueTabPrefsTable::ProjectId).eq(project_id))
            .build_rusqlite(SqliteQueryBuilder);

        let tab: Option<String> = self
            .conn
            .query_row(&sql, &*values.as_params(), |row| row.get(0))
            .ok();

        Ok(tab.map(|t| IssueTabId::parse(&t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_projects_newest_first() {
        let cache = Cache::open_in_memory().unwrap();
        cache
            .remember_project_at("p1", "octo/widgets", "2025-01-01T00:00:00Z")
            .unwrap();
        cache
            .remember_project_at("p2", "octo/gears", "2025-01-02T00:00:00Z")
            .unwrap();
        // Viewing p1 again moves it to the front
        cache
            .remember_project_at("p1", "octo/widgets", "2025-01-03T00:00:00Z")
            .unwrap();

        let recent = cache.recent_projects(10).unwrap();
        let ids: Vec<&str> = recent.iter().map(|r| r.project_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);

        assert_eq!(cache.recent_projects(1).unwrap().len(), 1);
    }

    #[test]
    fn active_tab_round_trips_per_project() {
        let cache = Cache::open_in_memory().unwrap();
        assert_eq!(cache.load_active_tab("p1").unwrap(), None);

        cache
            .save_active_tab("p1", &IssueTabId::Label("bug".into()))
            .unwrap();
        cache.save_active_tab("p2", &IssueTabId::All).unwrap();
        cache
            .save_active_tab("p1", &IssueTabId::Label("docs".into()))
            .unwrap();

        assert_eq!(
            cache.load_active_tab("p1").unwrap(),
            Some(IssueTabId::Label("docs".into()))
        );
        assert_eq!(cache.load_active_tab("p2").unwrap(), Some(IssueTabId::All));
    }

    #[test]
    fn reinit_keeps_data_at_same_version() {
        let cache = Cache::open_in_memory().unwrap();
        cache.remember_project_at("p1", "octo/widgets", "x").unwrap();
        init_db(&cache.conn).unwrap();
        assert_eq!(cache.recent_projects(5).unwrap().len(), 1);
    }
}
