use std::sync::Arc;

use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{CatalogQuery, NewProduct, Product, ProductPatch};
use crate::domain::errors::DomainError;
use crate::domain::media::{ImageKind, ImageUpload};
use crate::domain::ports::{ImageStorage, ProductRepository};
use crate::schema::products;

use super::contains_pattern;
use super::models::{NewProductRow, ProductChangeset, ProductRow};

pub struct DieselProductRepository {
    pool: DbPool,
    storage: Arc<dyn ImageStorage>,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool, storage: Arc<dyn ImageStorage>) -> Self {
        Self { pool, storage }
    }
}

impl ProductRepository for DieselProductRepository {
    fn list(&self, query: &CatalogQuery) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut rows = products::table
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

    fn get(&self, id: i32) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .filter(products::id.eq(id))
            .filter(products::available.eq(true))
            .select(ProductRow::as_select())
            .first(&mut conn)?;
        Ok(row.into())
    }

    fn create(&self, product: NewProduct, image: ImageUpload) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let id: i32 = diesel::insert_into(products::table)
                .values(&NewProductRow::from(product))
                .returning(products::id)
                .get_result(conn)?;

            let url = self.storage.save(ImageKind::Products, id, &image)?;
            diesel::update(products::table.find(id))
                .set(products::image_url.eq(url))
                .execute(conn)?;

            Ok(id)
        })
    }

    fn update(
        &self,
        id: i32,
        patch: ProductPatch,
        image: Option<ImageUpload>,
    ) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            products::table
                .find(id)
                .select(products::id)
                .for_update()
                .first::<i32>(conn)?;

            let mut changes = ProductChangeset::from(patch);
            if let Some(image) = &image {
                changes.image_url = Some(self.storage.save(ImageKind::Products, id, image)?);
            }

            diesel::update(products::table.find(id))
                .set(&changes)
                .execute(conn)?;
            Ok(())
        })
    }
}
