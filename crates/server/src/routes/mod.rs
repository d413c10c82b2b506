//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (pings the database)
//!
//! # Auth
//! POST /api/auth/register           - Create an account
//! POST /api/auth/login              - Verify credentials, issue bearer token
//!
//! # Users (admin)
//! GET/POST  /api/users              - List / create
//! GET/PUT/DELETE /api/users/{id}    - Read / update / delete
//!
//! # Staff (admin)
//! GET/POST  /api/staffs             - List / create
//! GET/PUT/DELETE /api/staffs/{id}   - Read / update / delete
//!
//! # Stores
//! GET  /api/stores                  - List (admin + parttime)
//! GET  /api/stores/chain/{chain}    - List one chain (admin + parttime)
//! GET  /api/stores/{id}             - Read (admin + parttime)
//! POST /api/stores                  - Create (admin)
//! PUT/DELETE /api/stores/{id}       - Update / delete (admin)
//!
//! # Campaigns
//! GET  /api/campaigns               - List (admin + parttime)
//! POST /api/campaigns               - Create (admin)
//! GET/PUT/DELETE /api/campaigns/{id}
//!
//! # Campaign-store assignments
//! GET    /api/campaigns/campaign-stores                    - Global joined listing
//! GET    /api/campaigns/{id}/stores                        - List for campaign
//! POST   /api/campaigns/{id}/stores                        - Add single store
//! POST   /api/campaigns/{id}/stores/bulk                   - Bulk reconcile
//! PATCH  /api/campaigns/{cid}/stores/{aid}                 - Toggle done flag
//! PATCH  /api/campaigns/{cid}/stores/{aid}/folder          - Set folder link
//! DELETE /api/campaigns/{id}/stores/{store_id}             - Remove single store
//! ```

pub mod assignments;
pub mod auth;
pub mod campaigns;
pub mod staff;
pub mod stores;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/users", users::router())
        .nest("/api/staffs", staff::router())
        .nest("/api/stores", stores::router())
        .nest("/api/campaigns", campaigns::router().merge(assignments::router()))
}
