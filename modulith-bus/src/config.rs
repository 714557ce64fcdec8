use bon::Builder;
use serde::Deserialize;

/// 事件总线配置
///
/// 可由组合根从配置文件反序列化（缺省字段取默认值）。
#[derive(Builder, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// 同一 (事件, 结果) 重复注册结果处理器时是否在注册期直接拒绝；
    /// 关闭后允许注册，但分发时按配置错误返回失败
    #[builder(default = true)]
    pub reject_duplicate_result_handlers: bool,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            reject_duplicate_result_handlers: true,
        }
    }
}
