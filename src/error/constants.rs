use super::const_error;

const_error!(INTERNAL, INTERNAL_SERVER_ERROR, "Server error");
const_error!(DATABASE_ERROR, INTERNAL_SERVER_ERROR, "Server error");
const_error!(
    PAYLOAD_TOO_LARGE,
    PAYLOAD_TOO_LARGE,
    "Request body is too large."
);
const_error!(
    JSON_CONTENT_TYPE,
    UNSUPPORTED_MEDIA_TYPE,
    "Unsupported media type in request."
);

const_error!(
    NOT_AUTHENTICATED,
    UNAUTHORIZED,
    "Authentication credentials were not provided."
);
const_error!(
    INVALID_CREDENTIALS,
    UNAUTHORIZED,
    "No active account found with the given credentials"
);
const_error!(INVALID_TOKEN, UNAUTHORIZED, "Token is invalid or expired");
const_error!(UNAUTHORIZED, FORBIDDEN, "Unauthorized");

const_error!(PLAYER_NOT_FOUND, NOT_FOUND, "Player not found");
const_error!(TEAM_NOT_FOUND, NOT_FOUND, "Team not found");
const_error!(MATCH_NOT_FOUND, NOT_FOUND, "Match not found");
const_error!(INVALID_PAGE, NOT_FOUND, "Invalid page.");
