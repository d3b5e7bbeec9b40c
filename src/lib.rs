//! # coursedesk
//!
//! Client core for the course-management platform: students browse and
//! enroll in courses, instructors create lessons and read dashboards.
//!
//! This crate contains the REST adapter and wire types, the auth and course
//! stores with their request lifecycles, bearer-token persistence, and route
//! gating. Rendering is left to whatever front end drives the [`store::Store`];
//! the bundled `coursedesk` binary is a command-line front end.

pub mod config;
pub mod net;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
