use std::sync::Arc;

use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{CatalogQuery, Category, CategoryPatch, NewCategory, Product};
use crate::domain::errors::DomainError;
use crate::domain::media::{ImageKind, ImageUpload};
use crate::domain::ports::{CategoryRepository, ImageStorage};
use crate::schema::{categories, products};

use super::contains_pattern;
use super::models::{CategoryChangeset, CategoryRow, NewCategoryRow, ProductRow};

pub struct DieselCategoryRepository {
    pool: DbPool,
    storage: Arc<dyn ImageStorage>,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool, storage: Arc<dyn ImageStorage>) -> Self {
        Self { pool, storage }
    }
}

impl CategoryRepository for DieselCategoryRepository {
    fn list(&self, query: &CatalogQuery) -> Result<Vec<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut rows = categories::table
            .filter(categories::available.eq(true))
            .select(CategoryRow::as_select())
            .into_boxed();
        if let Some(search) = &query.search {
            rows = rows.filter(categories::name.ilike(contains_pattern(search)));
        }

        Ok(rows
            .order(categories::id.asc())
            .limit(query.page.limit)
            .offset(query.page.offset)
            .load(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    fn get(&self, id: i32) -> Result<Category, DomainError> {
        let mut conn = self.pool.get()?;

        let row = categories::table
            .filter(categories::id.eq(id))
            .filter(categories::available.eq(true))
            .select(CategoryRow::as_select())
            .first(&mut conn)?;
        Ok(row.into())
    }

    fn list_products(
        &self,
        category_id: i32,
        query: &CatalogQuery,
    ) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut rows = products::table
            .filter(products::category_id.eq(category_id))
            .filter(products::available.eq(true))
            .select(ProductRow::as_select())
            .into_boxed();
        if let Some(search) = &query.search {
            rows = rows.filter(products::name.ilike(contains_pattern(search)));
        }

        Ok(rows
            .order(products::id.asc())
            .limit(query.page.limit)
            .offset(query.page.offset)
            .load(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    fn create(&self, category: NewCategory, image: ImageUpload) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let id: i32 = diesel::insert_into(categories::table)
                .values(&NewCategoryRow::from(category))
                .returning(categories::id)
                .get_result(conn)?;

            let url = self.storage.save(ImageKind::Categories, id, &image)?;
            diesel::update(categories::table.find(id))
                .set(categories::image_url.eq(url))
                .execute(conn)?;

            Ok(id)
        })
    }

    fn update(
        &self,
        id: i32,
        patch: CategoryPatch,
        image: Option<ImageUpload>,
    ) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            categories::table
                .find(id)
                .select(categories::id)
                .for_update()
                .first::<i32>(conn)?;

            let mut changes = CategoryChangeset::from(patch);
            if let Some(image) = &image {
                changes.image_url = Some(self.storage.save(ImageKind::Categories, id, image)?);
            }

            diesel::update(categories::table.find(id))
                .set(&changes)
                .execute(conn)?;
            Ok(())
        })
    }
}
