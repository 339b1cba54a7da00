//! HTTP submission surface for Fresco.
//!
//! Routes, all JSON unless noted:
//!
//! | method | path                              | answer                         |
//! |--------|-----------------------------------|--------------------------------|
//! | POST   | `/api/v1/videos/generate`         | acknowledgement, job queued    |
//! | GET    | `/api/v1/videos/status/:id`       | current job status             |
//! | GET    | `/api/v1/videos/list`             | published videos               |
//! | GET    | `/api/v1/videos/download/:name`   | video bytes                    |
//! | GET    | `/health`                         | liveness                       |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod error;
mod response;

pub use api::{ApiState, create_router, serve};
pub use error::ApiError;
pub use response::{GenerateResponse, StatusResponse, VideoEntry};
