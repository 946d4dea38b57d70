//! News article endpoints.

use ageless_core::NewsArticleId;

use super::{GameApiError, GameClient};
use crate::game::types::{NewsArticle, NewsArticleInput};

impl GameClient {
    /// List all news articles, newest first as the backend orders them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn news(&self, access_token: &str) -> Result<Vec<NewsArticle>, GameApiError> {
        self.get_json("/db/news", access_token).await
    }

    /// Publish a news article.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_news(
        &self,
        article: &NewsArticleInput,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .post(self.url("/db/news"))
                .bearer_auth(access_token)
                .json(article),
        )
        .await?;
        Ok(())
    }

    /// Update an existing news article.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_news(
        &self,
        id: NewsArticleId,
        article: &NewsArticleInput,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .put(self.url(&format!("/db/news/{id}")))
                .bearer_auth(access_token)
                .json(article),
        )
        .await?;
        Ok(())
    }

    /// Delete a news article.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_news(
        &self,
        id: NewsArticleId,
        access_token: &str,
    ) -> Result<(), GameApiError> {
        self.execute(
            self.http()
                .delete(self.url(&format!("/db/news/{id}")))
                .bearer_auth(access_token),
        )
        .await?;
        Ok(())
    }
}
