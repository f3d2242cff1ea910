/// API 业务错误码
///
/// 0 表示成功；40xx 为通用 HTTP 类错误；其余按领域分段。
/// 响应中以数值形式出现（`ApiResponse.code`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 4000,
    Unauthorized = 4001,
    Forbidden = 4003,
    NotFound = 4004,
    Conflict = 4009,
    RateLimitExceeded = 4029,
    InternalServerError = 5000,

    // 用户 1xxx
    UserNotFound = 1001,
    UserAlreadyExists = 1002,
    InvalidCredentials = 1003,
    UserDisabled = 1004,

    // 评分模板 2xxx
    TemplateNotFound = 2001,
    TemplateAlreadyExists = 2002,
    TemplateInUse = 2003,
    DimensionWeightInvalid = 2004,

    // 评审活动 3xxx
    EventNotFound = 3001,
    EventAlreadyExists = 3002,
    EventConfirmationMismatch = 3003,
    UploadWindowClosed = 3004,
    ReviewWindowClosed = 3005,
    EventPermissionDenied = 3006,
    WhitelistEntryExists = 3007,

    // 文档 6xxx
    DocumentNotFound = 6001,
    DocumentPermissionDenied = 6002,
    FileUploadFailed = 6003,
    FileTypeNotAllowed = 6004,
    FileSizeExceeded = 6005,
    MultifileUploadNotAllowed = 6006,
    FileNotFound = 6007,
    NoTemplateConfigured = 6008,

    // 评审 7xxx
    ReviewNotFound = 7001,
    ScoreValidationFailed = 7002,
    ReviewPermissionDenied = 7003,

    // 公告/说明 8xxx
    ContentNotFound = 8001,
}
