//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, users,
//!   clubs, memberships, announcements, health)
//! - **Schemas**: Request and response bodies plus the shared error payload
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, MembershipStatus, Role};
use crate::inbound::http::announcements::{AnnouncementBody, AnnouncementContentBody};
use crate::inbound::http::auth::LoginRequestBody;
use crate::inbound::http::clubs::{ClubBody, CreateClubRequestBody, MembershipOpenBody};
use crate::inbound::http::memberships::{
    HandoffBody, MemberBody, MembershipActionBody, RoleAssignmentBody,
};
use crate::inbound::http::users::{UserBody, UserMembershipBody};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Clubhouse backend API",
        description = "HTTP interface for club lifecycle, membership, and announcement management.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::me,
        crate::inbound::http::users::my_memberships,
        crate::inbound::http::clubs::create_club,
        crate::inbound::http::clubs::list_clubs,
        crate::inbound::http::clubs::get_club,
        crate::inbound::http::clubs::approve_club,
        crate::inbound::http::clubs::reject_club,
        crate::inbound::http::clubs::set_membership_open,
        crate::inbound::http::memberships::membership_status,
        crate::inbound::http::memberships::join_club,
        crate::inbound::http::memberships::leave_club,
        crate::inbound::http::memberships::list_members,
        crate::inbound::http::memberships::approve_member,
        crate::inbound::http::memberships::reject_member,
        crate::inbound::http::memberships::remove_member,
        crate::inbound::http::memberships::change_president,
        crate::inbound::http::announcements::post_announcement,
        crate::inbound::http::announcements::list_announcements,
        crate::inbound::http::announcements::get_announcement,
        crate::inbound::http::announcements::edit_announcement,
        crate::inbound::http::announcements::delete_announcement,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoginRequestBody,
        UserBody,
        UserMembershipBody,
        ClubBody,
        CreateClubRequestBody,
        MembershipOpenBody,
        MembershipActionBody,
        RoleAssignmentBody,
        HandoffBody,
        MemberBody,
        AnnouncementBody,
        AnnouncementContentBody,
        Error,
        ErrorCode,
        MembershipStatus,
        Role,
    )),
    tags(
        (name = "auth", description = "Session establishment and teardown"),
        (name = "users", description = "Authenticated user profile and memberships"),
        (name = "clubs", description = "Club proposal, review, and directory"),
        (name = "memberships", description = "Join requests, rosters, and role changes"),
        (name = "announcements", description = "Club announcement feeds"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema and path registration.

    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_club_schema_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let club_schema = schemas.get("ClubBody").expect("ClubBody schema");

        assert_object_schema_has_field(club_schema, "membershipOpen");
        assert_object_schema_has_field(club_schema, "createdBy");
    }

    #[test]
    fn openapi_document_registers_lifecycle_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/v1/login",
            "/api/v1/clubs",
            "/api/v1/clubs/{club_id}",
            "/api/v1/clubs/{club_id}/join",
            "/api/v1/clubs/{club_id}/president/{user_id}",
            "/api/v1/clubs/{club_id}/announcements",
            "/health/ready",
        ] {
            assert!(paths.contains_key(path), "path '{path}' should be listed");
        }
    }
}
