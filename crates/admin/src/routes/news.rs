//! News article management routes.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use ageless_core::NewsArticleId;

use crate::{
    error::AppError,
    filters,
    game::types::{NewsArticle, NewsArticleInput},
    middleware::guard::RequireOperator,
    routes::OperatorView,
    state::AppState,
};

/// News page template.
#[derive(Template)]
#[template(path = "news.html")]
pub struct NewsTemplate {
    pub operator: OperatorView,
    pub current_path: &'static str,
    pub articles: Vec<NewsArticle>,
    pub error: Option<String>,
}

/// News page handler.
#[instrument(skip(auth, state))]
pub async fn index(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let (articles, error) = match state.game().news(&auth.access_token).await {
        Ok(articles) => (articles, None),
        Err(error) => {
            tracing::error!(%error, "failed to load news");
            (vec![], Some("Failed to load news articles".to_owned()))
        }
    };

    let template = NewsTemplate {
        operator: OperatorView::from(&auth.operator),
        current_path: "/news",
        articles,
        error,
    };
    Ok(Html(template.render()?))
}

/// Article form for create and update.
#[derive(Debug, Deserialize)]
pub struct ArticleForm {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub img_url: String,
}

impl ArticleForm {
    fn into_input(self) -> Result<NewsArticleInput, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_owned()));
        }
        Ok(NewsArticleInput {
            title: self.title.trim().to_owned(),
            content: self.content,
            img_url: self.img_url.trim().to_owned(),
        })
    }
}

/// Publish an article.
#[instrument(skip(auth, state, form))]
pub async fn create(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Form(form): Form<ArticleForm>,
) -> Result<Redirect, AppError> {
    let input = form.into_input()?;
    state.game().create_news(&input, &auth.access_token).await?;
    tracing::info!(title = %input.title, operator = %auth.operator.email, "news article published");
    Ok(Redirect::to("/news"))
}

/// Update an article.
#[instrument(skip(auth, state, form))]
pub async fn update(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ArticleForm>,
) -> Result<Redirect, AppError> {
    let input = form.into_input()?;
    state
        .game()
        .update_news(NewsArticleId::new(id), &input, &auth.access_token)
        .await?;
    Ok(Redirect::to("/news"))
}

/// Delete an article.
#[instrument(skip(auth, state))]
pub async fn delete(
    RequireOperator(auth): RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state
        .game()
        .delete_news(NewsArticleId::new(id), &auth.access_token)
        .await?;
    tracing::info!(article_id = id, operator = %auth.operator.email, "news article deleted");
    Ok(Redirect::to("/news"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_form_requires_title() {
        let form = ArticleForm {
            title: "  ".to_owned(),
            content: "body".to_owned(),
            img_url: String::new(),
        };
        assert!(form.into_input().is_err());
    }
}
