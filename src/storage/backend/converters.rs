use crate::storage::ShortLink;
use migration::entities::link;

/// 将 Sea-ORM Model 转换为 ShortLink
pub fn model_to_shortlink(model: link::Model) -> ShortLink {
    ShortLink {
        code: model.code,
        url: model.url,
        total_clicks: model.total_clicks.max(0) as u64,
        last_clicked: model.last_clicked,
        created_at: model.created_at,
    }
}

/// 将 ShortLink 转换为插入用的 ActiveModel
pub fn shortlink_to_active_model(link: &ShortLink) -> link::ActiveModel {
    use sea_orm::ActiveValue::Set;

    link::ActiveModel {
        code: Set(link.code.clone()),
        url: Set(link.url.clone()),
        total_clicks: Set(i64::try_from(link.total_clicks).unwrap_or(i64::MAX)),
        last_clicked: Set(link.last_clicked),
        created_at: Set(link.created_at),
    }
}
