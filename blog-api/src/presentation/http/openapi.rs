use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::handlers::auth::{
    AccessTokenDto, TokenObtainDto, TokenPairDto, TokenRefreshDto,
};
use crate::presentation::http::handlers::comments::{CommentDto, CreateCommentDto};
use crate::presentation::http::handlers::posts::{
    CreatePostDto, PostDetailDto, PostDto, PostListItemDto, PostPageDto,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Blog API", description = "Posts and comments with JWT-gated writes"),
    paths(
        crate::presentation::http::handlers::auth::obtain_token,
        crate::presentation::http::handlers::auth::refresh_token,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::comments::list_comments,
        crate::presentation::http::handlers::comments::create_comment
    ),
    components(
        schemas(
            TokenObtainDto,
            TokenRefreshDto,
            TokenPairDto,
            AccessTokenDto,
            CreatePostDto,
            PostDto,
            PostListItemDto,
            PostDetailDto,
            PostPageDto,
            CreateCommentDto,
            CommentDto
        )
    ),
    tags(
        (name = "auth", description = "Token endpoints"),
        (name = "posts", description = "Post endpoints"),
        (name = "comments", description = "Comment endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
