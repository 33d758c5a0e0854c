use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService>,
    pub(crate) blog_service: Arc<BlogService>,
    pub(crate) jwt: Arc<JwtService>,
    pub(crate) posts_page_size: u32,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService>,
        blog_service: Arc<BlogService>,
        jwt: Arc<JwtService>,
        posts_page_size: u32,
    ) -> Self {
        Self {
            auth_service,
            blog_service,
            jwt,
            posts_page_size,
        }
    }
}
