use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, Unchanged,
};

use crate::{
    entities::{director, genre, movie},
    error::AppResult,
    models::{MovieFilter, MovieInput},
};

/// Single-table reads and writes for movies, directors and genres.
#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn list_movies(&self, filter: MovieFilter) -> AppResult<Vec<movie::Model>> {
        let query = movie::Entity::find().order_by_asc(movie::Column::Id);
        let query = match filter {
            MovieFilter::All => query,
            MovieFilter::Director(id) => query.filter(movie::Column::DirectorId.eq(id)),
            MovieFilter::Genre(id) => query.filter(movie::Column::GenreId.eq(id)),
            MovieFilter::Unmatchable => return Ok(Vec::new()),
        };
        Ok(query.all(&self.db).await?)
    }

    pub async fn get_movie(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Inserts a new movie. An `id` in the input is used as the primary key;
    /// otherwise the store assigns one.
    pub async fn create_movie(&self, input: MovieInput) -> AppResult<movie::Model> {
        let id = input.id;
        let mut model = active_movie(input);
        model.id = match id {
            Some(id) => Set(id),
            None => NotSet,
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Overwrites every mutable column of an existing movie. Returns `None`
    /// when no movie has this id.
    pub async fn update_movie(
        &self,
        id: i32,
        input: MovieInput,
    ) -> AppResult<Option<movie::Model>> {
        let mut model = active_movie(input);
        model.id = Unchanged(id);
        match model.update(&self.db).await {
            Ok(updated) => Ok(Some(updated)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns whether a row was removed.
    pub async fn delete_movie(&self, id: i32) -> AppResult<bool> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn list_directors(&self) -> AppResult<Vec<director::Model>> {
        Ok(director::Entity::find().order_by_asc(director::Column::Id).all(&self.db).await?)
    }

    pub async fn get_director(&self, id: i32) -> AppResult<Option<director::Model>> {
        Ok(director::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list_genres(&self) -> AppResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Id).all(&self.db).await?)
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Option<genre::Model>> {
        Ok(genre::Entity::find_by_id(id).one(&self.db).await?)
    }
}

fn active_movie(input: MovieInput) -> movie::ActiveModel {
    movie::ActiveModel {
        id: NotSet,
        title: Set(input.title),
        description: Set(input.description),
        trailer: Set(input.trailer),
        year: Set(input.year),
        rating: Set(input.rating),
        genre_id: Set(input.genre_id),
        director_id: Set(input.director_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_and_bootstrap;

    async fn catalog() -> Catalog {
        Catalog::new(connect_and_bootstrap("sqlite::memory:").await.unwrap())
    }

    fn inception() -> MovieInput {
        MovieInput {
            title: Some("Inception".to_string()),
            description: Some("Dreams within dreams".to_string()),
            trailer: Some("https://example.com/inception".to_string()),
            year: Some(2010),
            rating: Some(8.8),
            genre_id: Some(2),
            director_id: Some(1),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_round_trips() {
        let catalog = catalog().await;
        let created = catalog.create_movie(inception()).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = catalog.get_movie(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title.as_deref(), Some("Inception"));
        assert_eq!(fetched.rating, Some(8.8));
        assert_eq!(fetched.director_id, Some(1));
        assert_eq!(fetched.genre_id, Some(2));
    }

    #[tokio::test]
    async fn explicit_id_is_honoured_and_duplicates_fail() {
        let catalog = catalog().await;
        let created =
            catalog.create_movie(MovieInput { id: Some(42), ..inception() }).await.unwrap();
        assert_eq!(created.id, 42);

        let dup = catalog.create_movie(MovieInput { id: Some(42), ..inception() }).await;
        assert!(dup.is_err());
        assert_eq!(catalog.list_movies(MovieFilter::All).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn filters_by_director_then_genre() {
        let catalog = catalog().await;
        for (director_id, genre_id) in [(1, 2), (1, 3), (2, 2)] {
            catalog
                .create_movie(MovieInput {
                    director_id: Some(director_id),
                    genre_id: Some(genre_id),
                    ..inception()
                })
                .await
                .unwrap();
        }

        let by_director = catalog.list_movies(MovieFilter::Director(1)).await.unwrap();
        assert_eq!(by_director.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(by_director.iter().all(|m| m.director_id == Some(1)));

        let by_genre = catalog.list_movies(MovieFilter::Genre(2)).await.unwrap();
        assert_eq!(by_genre.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 3]);

        assert!(catalog.list_movies(MovieFilter::Genre(99)).await.unwrap().is_empty());
        assert!(catalog.list_movies(MovieFilter::Unmatchable).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_overwrites_every_field() {
        let catalog = catalog().await;
        let created = catalog.create_movie(inception()).await.unwrap();

        let updated = catalog
            .update_movie(
                created.id,
                MovieInput { id: Some(500), title: Some("Tenet".to_string()), ..Default::default() },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);

        let fetched = catalog.get_movie(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title.as_deref(), Some("Tenet"));
        assert_eq!(fetched.year, None);
        assert_eq!(fetched.rating, None);
        assert_eq!(fetched.director_id, None);
        assert!(catalog.get_movie(500).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id() {
        let catalog = catalog().await;
        assert!(catalog.update_movie(7, inception()).await.unwrap().is_none());
        assert!(!catalog.delete_movie(7).await.unwrap());
    }

    #[tokio::test]
    async fn update_after_concurrent_delete_is_none() {
        let catalog = catalog().await;
        let created = catalog.create_movie(inception()).await.unwrap();
        assert!(catalog.delete_movie(created.id).await.unwrap());

        assert!(catalog.update_movie(created.id, inception()).await.unwrap().is_none());
        assert!(catalog.get_movie(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let catalog = catalog().await;
        let created = catalog.create_movie(inception()).await.unwrap();
        assert!(catalog.delete_movie(created.id).await.unwrap());
        assert!(catalog.get_movie(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookup_tables_read_back_in_id_order() {
        let catalog = catalog().await;
        assert!(catalog.list_directors().await.unwrap().is_empty());
        assert!(catalog.list_genres().await.unwrap().is_empty());

        for name in ["Nolan", "Villeneuve"] {
            director::ActiveModel { id: NotSet, name: Set(Some(name.to_string())) }
                .insert(catalog.db())
                .await
                .unwrap();
        }
        genre::ActiveModel { id: NotSet, name: Set(Some("Sci-Fi".to_string())) }
            .insert(catalog.db())
            .await
            .unwrap();

        let directors = catalog.list_directors().await.unwrap();
        assert_eq!(directors.len(), 2);
        assert_eq!(directors[1].name.as_deref(), Some("Villeneuve"));
        assert_eq!(catalog.get_director(1).await.unwrap().unwrap().name.as_deref(), Some("Nolan"));
        assert!(catalog.get_director(3).await.unwrap().is_none());

        assert_eq!(catalog.get_genre(1).await.unwrap().unwrap().name.as_deref(), Some("Sci-Fi"));
        assert!(catalog.get_genre(2).await.unwrap().is_none());
    }
}
