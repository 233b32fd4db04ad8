// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Stable diagnostic codes.

pub const NO_SUCH_TABLE: &str = "CATALOG_001";
pub const NO_SUCH_COLUMN: &str = "CATALOG_002";
pub const NO_SUCH_INDEX: &str = "CATALOG_003";
pub const NO_SUCH_UNIQUE: &str = "CATALOG_004";
pub const DUPLICATE_TABLE_NAME: &str = "CATALOG_005";
pub const JOIN_TO_UNKNOWN_TABLE: &str = "CATALOG_006";
pub const JOIN_CYCLE: &str = "CATALOG_007";
pub const DUPLICATE_COLUMN_NAME: &str = "CATALOG_008";
pub const DUPLICATE_INDEX_NAME: &str = "CATALOG_009";

pub const NO_SUCH_GROUPING_FK: &str = "ALTER_001";
pub const JOIN_TO_MULTIPLE_PARENTS: &str = "ALTER_002";
pub const JOIN_COLUMN_MISMATCH: &str = "ALTER_003";
pub const UNSUPPORTED_FK_INDEX: &str = "ALTER_004";
pub const UNSUPPORTED_CHECK_CONSTRAINT: &str = "ALTER_005";
pub const UNSUPPORTED_SQL: &str = "ALTER_006";
pub const COLUMN_ALREADY_GENERATED: &str = "ALTER_007";
pub const COLUMN_NOT_GENERATED: &str = "ALTER_008";

pub const SOURCE_IS_NULL: &str = "ROW_001";
pub const ENCODING_EXCEPTION: &str = "ROW_002";
pub const INVALID_ROW: &str = "ROW_003";

pub const QUERY_CANCELLED: &str = "QUERY_001";

pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
