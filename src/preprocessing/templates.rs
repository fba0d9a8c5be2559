//! Prompt skeletons sent to the completion endpoint.

use crate::config::Locale;
use crate::geometry::GeometryType;

/// Worked example embedded in every prompt. The repair step in
/// `postprocessing` undoes the deviations models typically make from it.
pub const EXAMPLE_SCHEMA: &str = r#"{
    "geometryType": "棱柱",
    "dimensions": {
        "width": 4,
        "height": 2,
        "depth": 4
    },
    "points": [
        {"name": "A", "coordinates": [-2, -2, 0]},
        {"name": "B", "coordinates": [2, -2, 0]},
        {"name": "C", "coordinates": [2, 2, 0]},
        {"name": "D", "coordinates": [-2, 2, 0]},
        {"name": "A1", "coordinates": [-2, -2, 2]},
        {"name": "B1", "coordinates": [2, -2, 2]},
        {"name": "C1", "coordinates": [2, 2, 2]},
        {"name": "D1", "coordinates": [-2, 2, 2]},
        {"name": "E", "coordinates": [0, 0, 1]},
        {"name": "F", "coordinates": [2, 0, 1]}
    ],
    "helperLines": [
        {
            "start": [-2, -2, 0],
            "end": [2, 2, 0],
            "color": "0x666666",
            "description": "对角线AC"
        }
    ],
    "description": "四棱柱ABCD-A1B1C1D1，其中点E是CC1的中点，点F在BC上且BF=FC"
}"#;

fn allowed_types(locale: Locale) -> String {
    let names: Vec<&str> = GeometryType::ALL
        .iter()
        .map(|kind| match locale {
            Locale::En => kind.canonical_name(),
            Locale::ZhCn => kind.alias(),
        })
        .collect();
    match locale {
        Locale::En => names.join(", "),
        Locale::ZhCn => names.join("、"),
    }
}

pub fn geometry_prompt(problem: &str, locale: Locale) -> String {
    match locale {
        Locale::ZhCn => chinese_prompt(problem),
        Locale::En => english_prompt(problem),
    }
}

fn chinese_prompt(problem: &str) -> String {
    format!(
        "作为一个专业的立体几何解析助手，请将以下立体几何题目解析为标准的JSON格式。

题目内容：{problem}

请严格按照以下格式返回JSON：
{example}

解析要求：
1. 所有数值必须是数字，不能用字符串
2. 坐标值必须是实际的数值，基于题目给定的条件计算
3. 几何体类型必须是以下之一：{types}
4. 根据几何体类型提供相应的尺寸参数
5. 确保JSON格式完全正确，不要添加任何额外的文本说明
6. 所有点的坐标必须符合题目给定的条件和空间关系
7. 辅助线必须包含题目中所有的虚线和特殊线段
8. 辅助线颜色使用十六进制数值（如0x666666）

请直接返回JSON数据，不要有任何其他说明文字。",
        problem = problem,
        example = EXAMPLE_SCHEMA,
        types = allowed_types(Locale::ZhCn),
    )
}

fn english_prompt(problem: &str) -> String {
    format!(
        "You are an expert solid-geometry parser. Convert the following solid-geometry problem into the standard JSON format.

Problem: {problem}

Return JSON strictly in this format:
{example}

Requirements:
1. Every numeric value must be a number, never a string
2. Coordinates must be actual values computed from the conditions of the problem
3. geometryType must be one of: {types}
4. Provide the dimensions that match the geometry type
5. The JSON must be completely valid; do not add any explanatory text
6. Every point must satisfy the conditions and spatial relations of the problem
7. helperLines must include every dashed line and special segment in the problem
8. helper line colors use hexadecimal values (such as 0x666666)

Return only the JSON data, with no other text.",
        problem = problem,
        example = EXAMPLE_SCHEMA,
        types = allowed_types(Locale::En),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chinese_prompt_lists_every_alias() {
        let prompt = geometry_prompt("已知正方体棱长为2", Locale::ZhCn);
        assert!(prompt.contains("题目内容：已知正方体棱长为2"));
        assert!(prompt.contains("棱锥、棱柱、圆锥、圆柱、球体"));
        assert!(prompt.contains("\"geometryType\": \"棱柱\""));
    }

    #[test]
    fn english_prompt_lists_canonical_names() {
        let prompt = geometry_prompt("A sphere of radius 2", Locale::En);
        assert!(prompt.contains("Problem: A sphere of radius 2"));
        assert!(prompt.contains("pyramid, prism, cone, cylinder, sphere"));
        assert!(prompt.contains("\"helperLines\""));
    }

    #[test]
    fn example_schema_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(EXAMPLE_SCHEMA).unwrap();
        assert_eq!(value["points"].as_array().unwrap().len(), 10);
    }
}
