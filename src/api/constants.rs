//! API 模块常量定义

/// Access Token Cookie 名称
pub const ACCESS_COOKIE_NAME: &str = "linklister_access";

/// Query parameter carrying the originally requested path to the login route
pub const LOGIN_NEXT_PARAM: &str = "next";

/// Management routes, relative to the admin prefix
pub const LOGIN_ROUTE: &str = "/auth/login";
pub const LIST_MINE_ROUTE: &str = "/links/mine";
