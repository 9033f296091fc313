use crate::models::NewVocabulary;

pub struct VocabSeed {
    pub word: &'static str,
    pub kana: &'static str,
    pub english: &'static str,
    pub part_of_speech: &'static str,
    pub example: &'static str,
}

impl VocabSeed {
    fn to_new(&self, jlpt_level: &str) -> NewVocabulary {
        NewVocabulary {
            word: self.word.to_string(),
            kana: self.kana.to_string(),
            english: self.english.to_string(),
            jlpt_level: jlpt_level.to_string(),
            part_of_speech: self.part_of_speech.to_string(),
            example: self.example.to_string(),
        }
    }
}

pub const N5_DATA: &[VocabSeed] = &[
    VocabSeed {
        word: "あう",
        kana: "あう",
        english: "to meet",
        part_of_speech: "verb",
        example: "友達に会います。",
    },
    VocabSeed {
        word: "青い",
        kana: "あおい",
        english: "blue",
        part_of_speech: "adjective",
        example: "空が青いです。",
    },
    VocabSeed {
        word: "赤い",
        kana: "あかい",
        english: "red",
        part_of_speech: "adjective",
        example: "赤い花があります。",
    },
    VocabSeed {
        word: "秋",
        kana: "あき",
        english: "autumn",
        part_of_speech: "noun",
        example: "秋は涼しいです。",
    },
    VocabSeed {
        word: "開く",
        kana: "あく",
        english: "to open",
        part_of_speech: "verb",
        example: "ドアが開きます。",
    },
    VocabSeed {
        word: "朝",
        kana: "あさ",
        english: "morning",
        part_of_speech: "noun",
        example: "朝ご飯を食べます。",
    },
    VocabSeed {
        word: "あさって",
        kana: "あさって",
        english: "day after tomorrow",
        part_of_speech: "noun",
        example: "あさって会いましょう。",
    },
    VocabSeed {
        word: "足",
        kana: "あし",
        english: "foot, leg",
        part_of_speech: "noun",
        example: "足が痛いです。",
    },
    VocabSeed {
        word: "明日",
        kana: "あした",
        english: "tomorrow",
        part_of_speech: "noun",
        example: "明日は雨です。",
    },
    VocabSeed {
        word: "あそこ",
        kana: "あそこ",
        english: "over there",
        part_of_speech: "pronoun",
        example: "あそこに学校があります。",
    },
    VocabSeed {
        word: "遊ぶ",
        kana: "あそぶ",
        english: "to play",
        part_of_speech: "verb",
        example: "公園で遊びます。",
    },
    VocabSeed {
        word: "暖かい",
        kana: "あたたかい",
        english: "warm",
        part_of_speech: "adjective",
        example: "今日は暖かいです。",
    },
    VocabSeed {
        word: "頭",
        kana: "あたま",
        english: "head",
        part_of_speech: "noun",
        example: "頭が痛いです。",
    },
    VocabSeed {
        word: "新しい",
        kana: "あたらしい",
        english: "new",
        part_of_speech: "adjective",
        example: "新しい車を買いました。",
    },
    VocabSeed {
        word: "あちら",
        kana: "あちら",
        english: "over there (polite)",
        part_of_speech: "pronoun",
        example: "あちらは図書館です。",
    },
    VocabSeed {
        word: "暑い",
        kana: "あつい",
        english: "hot",
        part_of_speech: "adjective",
        example: "夏は暑いです。",
    },
    VocabSeed {
        word: "厚い",
        kana: "あつい",
        english: "thick",
        part_of_speech: "adjective",
        example: "厚い本です。",
    },
    VocabSeed {
        word: "あっち",
        kana: "あっち",
        english: "over there",
        part_of_speech: "pronoun",
        example: "あっちに行きます。",
    },
    VocabSeed {
        word: "後",
        kana: "あと",
        english: "after",
        part_of_speech: "noun",
        example: "後で電話します。",
    },
    VocabSeed {
        word: "あなた",
        kana: "あなた",
        english: "you",
        part_of_speech: "pronoun",
        example: "あなたは学生ですか。",
    },
    VocabSeed {
        word: "兄",
        kana: "あに",
        english: "older brother",
        part_of_speech: "noun",
        example: "兄は会社員です。",
    },
    VocabSeed {
        word: "姉",
        kana: "あね",
        english: "older sister",
        part_of_speech: "noun",
        example: "姉は先生です。",
    },
    VocabSeed {
        word: "あの",
        kana: "あの",
        english: "that (over there)",
        part_of_speech: "determiner",
        example: "あの人は誰ですか。",
    },
    VocabSeed {
        word: "アパート",
        kana: "アパート",
        english: "apartment",
        part_of_speech: "noun",
        example: "新しいアパートに住んでいます。",
    },
    VocabSeed {
        word: "危ない",
        kana: "あぶない",
        english: "dangerous",
        part_of_speech: "adjective",
        example: "ここは危ないです。",
    },
    VocabSeed {
        word: "甘い",
        kana: "あまい",
        english: "sweet",
        part_of_speech: "adjective",
        example: "このケーキは甘いです。",
    },
    VocabSeed {
        word: "雨",
        kana: "あめ",
        english: "rain",
        part_of_speech: "noun",
        example: "雨が降っています。",
    },
    VocabSeed {
        word: "飴",
        kana: "あめ",
        english: "candy",
        part_of_speech: "noun",
        example: "子供が飴を食べています。",
    },
    VocabSeed {
        word: "洗う",
        kana: "あらう",
        english: "to wash",
        part_of_speech: "verb",
        example: "手を洗います。",
    },
    VocabSeed {
        word: "ある",
        kana: "ある",
        english: "to exist",
        part_of_speech: "verb",
        example: "机の上に本があります。",
    },
    VocabSeed {
        word: "歩く",
        kana: "あるく",
        english: "to walk",
        part_of_speech: "verb",
        example: "毎日歩きます。",
    },
    VocabSeed {
        word: "いい",
        kana: "いい",
        english: "good",
        part_of_speech: "adjective",
        example: "いい天気ですね。",
    },
    VocabSeed {
        word: "言う",
        kana: "いう",
        english: "to say",
        part_of_speech: "verb",
        example: "何と言いましたか。",
    },
    VocabSeed {
        word: "家",
        kana: "いえ",
        english: "house",
        part_of_speech: "noun",
        example: "大きい家に住んでいます。",
    },
    VocabSeed {
        word: "行く",
        kana: "いく",
        english: "to go",
        part_of_speech: "verb",
        example: "学校に行きます。",
    },
    VocabSeed {
        word: "いくつ",
        kana: "いくつ",
        english: "how many",
        part_of_speech: "interrogative",
        example: "りんごはいくつありますか。",
    },
    VocabSeed {
        word: "いくら",
        kana: "いくら",
        english: "how much",
        part_of_speech: "interrogative",
        example: "これはいくらですか。",
    },
    VocabSeed {
        word: "池",
        kana: "いけ",
        english: "pond",
        part_of_speech: "noun",
        example: "公園に池があります。",
    },
    VocabSeed {
        word: "医者",
        kana: "いしゃ",
        english: "doctor",
        part_of_speech: "noun",
        example: "医者に行きます。",
    },
    VocabSeed {
        word: "椅子",
        kana: "いす",
        english: "chair",
        part_of_speech: "noun",
        example: "椅子に座ります。",
    },
    VocabSeed {
        word: "忙しい",
        kana: "いそがしい",
        english: "busy",
        part_of_speech: "adjective",
        example: "今日は忙しいです。",
    },
    VocabSeed {
        word: "痛い",
        kana: "いたい",
        english: "painful",
        part_of_speech: "adjective",
        example: "頭が痛いです。",
    },
    VocabSeed {
        word: "一",
        kana: "いち",
        english: "one",
        part_of_speech: "number",
        example: "一つください。",
    },
    VocabSeed {
        word: "一番",
        kana: "いちばん",
        english: "most, best",
        part_of_speech: "adverb",
        example: "これが一番好きです。",
    },
    VocabSeed {
        word: "五日",
        kana: "いつか",
        english: "fifth day",
        part_of_speech: "noun",
        example: "五日に会いましょう。",
    },
    VocabSeed {
        word: "いつも",
        kana: "いつも",
        english: "always",
        part_of_speech: "adverb",
        example: "いつも元気です。",
    },
    VocabSeed {
        word: "犬",
        kana: "いぬ",
        english: "dog",
        part_of_speech: "noun",
        example: "犬を飼っています。",
    },
    VocabSeed {
        word: "今",
        kana: "いま",
        english: "now",
        part_of_speech: "noun",
        example: "今、何時ですか。",
    },
    VocabSeed {
        word: "意味",
        kana: "いみ",
        english: "meaning",
        part_of_speech: "noun",
        example: "この言葉の意味は何ですか。",
    },
    VocabSeed {
        word: "妹",
        kana: "いもうと",
        english: "younger sister",
        part_of_speech: "noun",
        example: "妹は高校生です。",
    },
    VocabSeed {
        word: "嫌",
        kana: "いや",
        english: "unpleasant",
        part_of_speech: "adjective",
        example: "嫌な天気ですね。",
    },
    VocabSeed {
        word: "入口",
        kana: "いりぐち",
        english: "entrance",
        part_of_speech: "noun",
        example: "入口はあちらです。",
    },
    VocabSeed {
        word: "色",
        kana: "いろ",
        english: "color",
        part_of_speech: "noun",
        example: "好きな色は何ですか。",
    },
    VocabSeed {
        word: "いろいろ",
        kana: "いろいろ",
        english: "various",
        part_of_speech: "adverb",
        example: "いろいろな本があります。",
    },
];

pub const N4_DATA: &[VocabSeed] = &[
    VocabSeed {
        word: "合う",
        kana: "あう",
        english: "to fit, to suit",
        part_of_speech: "verb",
        example: "この服は私に合います。",
    },
    VocabSeed {
        word: "愛",
        kana: "あい",
        english: "love",
        part_of_speech: "noun",
        example: "愛は大切です。",
    },
    VocabSeed {
        word: "間",
        kana: "あいだ",
        english: "between, during",
        part_of_speech: "noun",
        example: "授業の間に休憩があります。",
    },
    VocabSeed {
        word: "相手",
        kana: "あいて",
        english: "partner, opponent",
        part_of_speech: "noun",
        example: "テニスの相手を探しています。",
    },
    VocabSeed {
        word: "挨拶",
        kana: "あいさつ",
        english: "greeting",
        part_of_speech: "noun",
        example: "朝の挨拶をします。",
    },
    VocabSeed {
        word: "上がる",
        kana: "あがる",
        english: "to rise, to go up",
        part_of_speech: "verb",
        example: "気温が上がります。",
    },
    VocabSeed {
        word: "諦める",
        kana: "あきらめる",
        english: "to give up",
        part_of_speech: "verb",
        example: "簡単に諦めません。",
    },
    VocabSeed {
        word: "憧れ",
        kana: "あこがれ",
        english: "longing, admiration",
        part_of_speech: "noun",
        example: "彼への憧れがあります。",
    },
    VocabSeed {
        word: "集まる",
        kana: "あつまる",
        english: "to gather",
        part_of_speech: "verb",
        example: "友達が集まります。",
    },
    VocabSeed {
        word: "扱う",
        kana: "あつかう",
        english: "to handle, to treat",
        part_of_speech: "verb",
        example: "機械を扱います。",
    },
    VocabSeed {
        word: "案内",
        kana: "あんない",
        english: "guidance, guide",
        part_of_speech: "noun",
        example: "駅で案内をもらいました。",
    },
    VocabSeed {
        word: "安心",
        kana: "あんしん",
        english: "relief, peace of mind",
        part_of_speech: "noun",
        example: "母の声を聞いて安心しました。",
    },
    VocabSeed {
        word: "以外",
        kana: "いがい",
        english: "except, other than",
        part_of_speech: "noun",
        example: "日曜日以外は忙しいです。",
    },
    VocabSeed {
        word: "意見",
        kana: "いけん",
        english: "opinion",
        part_of_speech: "noun",
        example: "あなたの意見を聞かせてください。",
    },
    VocabSeed {
        word: "以上",
        kana: "いじょう",
        english: "more than, above",
        part_of_speech: "noun",
        example: "十人以上来ました。",
    },
    VocabSeed {
        word: "以下",
        kana: "いか",
        english: "below, under",
        part_of_speech: "noun",
        example: "五歳以下は無料です。",
    },
    VocabSeed {
        word: "一生懸命",
        kana: "いっしょうけんめい",
        english: "with all one's might",
        part_of_speech: "adverb",
        example: "一生懸命勉強します。",
    },
    VocabSeed {
        word: "印象",
        kana: "いんしょう",
        english: "impression",
        part_of_speech: "noun",
        example: "良い印象を受けました。",
    },
    VocabSeed {
        word: "運動",
        kana: "うんどう",
        english: "exercise, movement",
        part_of_speech: "noun",
        example: "毎日運動しています。",
    },
    VocabSeed {
        word: "営業",
        kana: "えいぎょう",
        english: "business, sales",
        part_of_speech: "noun",
        example: "営業の仕事をしています。",
    },
    VocabSeed {
        word: "影響",
        kana: "えいきょう",
        english: "influence",
        part_of_speech: "noun",
        example: "天気は気分に影響します。",
    },
    VocabSeed {
        word: "笑顔",
        kana: "えがお",
        english: "smile",
        part_of_speech: "noun",
        example: "いつも笑顔でいます。",
    },
    VocabSeed {
        word: "お客",
        kana: "おきゃく",
        english: "customer, guest",
        part_of_speech: "noun",
        example: "お客さんが来ました。",
    },
    VocabSeed {
        word: "億",
        kana: "おく",
        english: "hundred million",
        part_of_speech: "number",
        example: "一億円の宝くじ。",
    },
    VocabSeed {
        word: "奥さん",
        kana: "おくさん",
        english: "wife (polite)",
        part_of_speech: "noun",
        example: "田中さんの奥さんです。",
    },
    VocabSeed {
        word: "怒る",
        kana: "おこる",
        english: "to get angry",
        part_of_speech: "verb",
        example: "父が怒りました。",
    },
    VocabSeed {
        word: "お祭り",
        kana: "おまつり",
        english: "festival",
        part_of_speech: "noun",
        example: "夏にお祭りがあります。",
    },
    VocabSeed {
        word: "重い",
        kana: "おもい",
        english: "heavy",
        part_of_speech: "adjective",
        example: "この荷物は重いです。",
    },
    VocabSeed {
        word: "思う",
        kana: "おもう",
        english: "to think",
        part_of_speech: "verb",
        example: "そう思います。",
    },
    VocabSeed {
        word: "表",
        kana: "おもて",
        english: "surface, front",
        part_of_speech: "noun",
        example: "紙の表に書きます。",
    },
];

/// Built-in vocabulary, tagged with its JLPT level.
pub fn builtin_vocabulary() -> Vec<NewVocabulary> {
    N5_DATA
        .iter()
        .map(|v| v.to_new("N5"))
        .chain(N4_DATA.iter().map(|v| v.to_new("N4")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_vocabulary() {
        let all = builtin_vocabulary();
        assert_eq!(N5_DATA.len(), 54);
        assert_eq!(N4_DATA.len(), 30);
        assert_eq!(all.len(), 84);
        assert_eq!(all[0].word, "あう");
        assert_eq!(all[83].jlpt_level, "N4");

        let distinct: HashSet<(&str, &str)> = all
            .iter()
            .map(|v| (v.word.as_str(), v.jlpt_level.as_str()))
            .collect();
        assert_eq!(distinct.len(), all.len());
        assert!(all.iter().all(|v| !v.kana.is_empty() && !v.english.is_empty()));
    }
}
