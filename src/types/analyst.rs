use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 分析师画像 - 驱动一场模拟访谈的虚拟视角
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Analyst {
    /// 分析师姓名
    pub name: String,
    /// 在访谈主题中承担的角色
    pub role: String,
    /// 所属机构或组织
    pub affiliation: String,
    /// 关注点、顾虑与动机的描述
    pub description: String,
}

impl Analyst {
    /// 渲染为提示词中使用的人设描述
    pub fn persona(&self) -> String {
        format!(
            "Name: {}\nRole: {}\nAffiliation: {}\nDescription: {}",
            self.name, self.role, self.affiliation, self.description
        )
    }

    /// 生成用于Memory键和文件名的稳定标识
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        let mut last_dash = true;
        for c in self.name.chars() {
            if c.is_alphanumeric() {
                for lc in c.to_lowercase() {
                    slug.push(lc);
                }
                last_dash = false;
            } else if !last_dash {
                slug.push('-');
                last_dash = true;
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        if slug.is_empty() {
            slug.push_str("analyst");
        }
        slug
    }
}

/// 分析师小组 - AnalystFactory的结构化提取结果
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct Perspectives {
    /// 本次调研的全部分析师画像
    pub analysts: Vec<Analyst>,
}

/// 规划阶段状态
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerateAnalystsState {
    /// 调研主题
    pub topic: String,
    /// 分析师数量上限
    pub max_analysts: usize,
    /// 操作者在检查点给出的反馈，为空表示已通过
    pub human_feedback: Option<String>,
    /// 当前生成的分析师小组
    pub analysts: Vec<Analyst>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_analyst() -> Analyst {
        Analyst {
            name: "Dr. Ada Chen".to_string(),
            role: "Energy economist".to_string(),
            affiliation: "Global Policy Lab".to_string(),
            description: "Focuses on cost curves and market incentives.".to_string(),
        }
    }

    #[test]
    fn test_persona_contains_all_fields() {
        let analyst = sample_analyst();
        let persona = analyst.persona();
        assert!(persona.contains("Dr. Ada Chen"));
        assert!(persona.contains("Energy economist"));
        assert!(persona.contains("Global Policy Lab"));
        assert!(persona.contains("cost curves"));
    }

    #[test]
    fn test_slug_is_stable_and_safe() {
        let analyst = sample_analyst();
        assert_eq!(analyst.slug(), "dr-ada-chen");
        // 同一画像多次调用结果一致
        assert_eq!(analyst.slug(), analyst.slug());
    }

    #[test]
    fn test_slug_of_empty_name_falls_back() {
        let analyst = Analyst {
            name: "!!!".to_string(),
            role: String::new(),
            affiliation: String::new(),
            description: String::new(),
        };
        assert_eq!(analyst.slug(), "analyst");
    }

    #[test]
    fn test_perspectives_roundtrip() {
        let perspectives = Perspectives {
            analysts: vec![sample_analyst()],
        };
        let json = serde_json::to_string(&perspectives).unwrap();
        let parsed: Perspectives = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.analysts.len(), 1);
        assert_eq!(parsed.analysts[0], sample_analyst());
    }
}
